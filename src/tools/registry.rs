//! Named tools over the animal and health services.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::{Span, debug, instrument, warn};

use crate::application::services::{AnimalService, HealthService};
use crate::domain::entities::AnimalKind;
use crate::domain::errors::fallback_image;
use crate::domain::gateways::{HttpTransport, ToolSpec};

/// Every tool the registry can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Animal(AnimalKind),
    Ping,
    HealthCheck,
}

impl Tool {
    pub const ALL: [Tool; 5] = [
        Tool::Animal(AnimalKind::Duck),
        Tool::Animal(AnimalKind::Dog),
        Tool::Animal(AnimalKind::Cat),
        Tool::Ping,
        Tool::HealthCheck,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Animal(kind) => kind.as_str(),
            Tool::Ping => "ping",
            Tool::HealthCheck => "health_check",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::Animal(AnimalKind::Duck) => "Get a random duck image URL",
            Tool::Animal(AnimalKind::Dog) => "Get a random dog image URL",
            Tool::Animal(AnimalKind::Cat) => "Get a random cat image URL",
            Tool::Ping => "Check that the server is responding",
            Tool::HealthCheck => "Report the health of the upstream animal APIs",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

/// Tool descriptor as published to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl From<Tool> for ToolDescriptor {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: json!({"type": "object", "properties": {}}),
        }
    }
}

impl From<Tool> for ToolSpec {
    fn from(tool: Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
        }
    }
}

/// Text produced by a tool call.
///
/// `is_error` marks content that describes a failure rather than a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    pub tool: String,
    pub content: String,
    #[serde(skip)]
    pub is_error: bool,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for tool {tool}: expected an object")]
    InvalidArguments { tool: String },
}

/// Dispatches tool calls by name.
pub struct ToolRegistry<T: HttpTransport + ?Sized> {
    animals: Arc<AnimalService<T>>,
    health: Arc<HealthService<T>>,
}

impl<T: HttpTransport + ?Sized> ToolRegistry<T> {
    pub fn new(animals: Arc<AnimalService<T>>, health: Arc<HealthService<T>>) -> Self {
        Self { animals, health }
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        Tool::ALL.into_iter().map(ToolDescriptor::from).collect()
    }

    /// Name/description pairs handed to a tool selector.
    pub fn specs(&self) -> Vec<ToolSpec> {
        Tool::ALL.into_iter().map(ToolSpec::from).collect()
    }

    /// Like [`Self::specs`], restricted to the animal tools.
    pub fn animal_specs(&self) -> Vec<ToolSpec> {
        Tool::ALL
            .into_iter()
            .filter(|tool| matches!(tool, Tool::Animal(_)))
            .map(ToolSpec::from)
            .collect()
    }

    /// Runs the tool called `name`.
    ///
    /// No tool takes parameters; `args` must be absent, `null` or an object.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::UnknownTool`] for names outside the registry.
    /// Upstream failures are not errors here: they come back as content.
    #[instrument(
        name = "tool_call",
        skip(self, args),
        fields(tool = %name, is_error = tracing::field::Empty)
    )]
    pub async fn call(&self, name: &str, args: Option<&Value>) -> Result<ToolOutput, ToolError> {
        let tool: Tool = name.parse()?;

        if matches!(args, Some(v) if !v.is_null() && !v.is_object()) {
            return Err(ToolError::InvalidArguments {
                tool: tool.name().to_string(),
            });
        }

        debug!(tool = %tool, "Calling tool");

        let output = match tool {
            Tool::Animal(kind) => self.call_animal(kind).await,
            Tool::Ping => ToolOutput::text(tool, "pong"),
            Tool::HealthCheck => ToolOutput::text(tool, self.health.check_all().await.report()),
        };

        Span::current().record("is_error", output.is_error);
        debug!(is_error = output.is_error, "Tool finished");

        Ok(output)
    }

    async fn call_animal(&self, kind: AnimalKind) -> ToolOutput {
        let tool = Tool::Animal(kind);

        match self.animals.fetch(kind).await {
            Ok(image) => ToolOutput::text(tool, image.url),
            Err(e) if kind == AnimalKind::Dog => {
                warn!(error = %e, "Dog tool serving static fallback image");
                ToolOutput::text(tool, fallback_image(kind))
            }
            Err(e) => ToolOutput {
                tool: tool.name().to_string(),
                content: e.user_message(),
                is_error: true,
            },
        }
    }
}

impl ToolOutput {
    fn text(tool: Tool, content: impl Into<String>) -> Self {
        Self {
            tool: tool.name().to_string(),
            content: content.into(),
            is_error: false,
        }
    }
}
