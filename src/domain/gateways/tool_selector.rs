//! Natural-language tool selection abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name and description of a tool offered to a selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

/// The tool a selector picked for a query.
///
/// `tool` is `None` when nothing matches the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolChoice {
    pub tool: Option<String>,
    #[serde(default = "empty_object")]
    pub parameters: Value,
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}

impl ToolChoice {
    pub fn tool(name: impl Into<String>) -> Self {
        Self {
            tool: Some(name.into()),
            parameters: empty_object(),
        }
    }

    pub fn none() -> Self {
        Self {
            tool: None,
            parameters: empty_object(),
        }
    }
}

/// Errors raised while asking a selector backend for a choice.
#[derive(Debug, thiserror::Error)]
pub enum SelectorError {
    #[error("selector backend request failed: {0}")]
    Backend(String),

    #[error("could not parse selector response: {0}")]
    InvalidResponse(String),
}

/// Maps free text to a tool choice.
///
/// # Implementations
///
/// - [`crate::infrastructure::selector::KeywordSelector`] - animal name matching
/// - [`crate::infrastructure::selector::OllamaSelector`] - local LLM via Ollama
/// - [`crate::infrastructure::selector::AnthropicSelector`] - Claude via the Messages API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ToolSelector: Send + Sync {
    /// Short backend name for logs and the CLI banner.
    fn name(&self) -> &'static str;

    /// Picks at most one tool for `query` from `tools`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] when the backend is unreachable or answers
    /// with something that is not a tool choice.
    async fn select(&self, query: &str, tools: &[ToolSpec]) -> Result<ToolChoice, SelectorError>;
}
