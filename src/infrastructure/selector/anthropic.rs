//! Claude-backed tool selection through the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::gateways::{SelectorError, ToolChoice, ToolSelector, ToolSpec};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
    tools: Vec<ClaudeTool<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ClaudeTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: Value,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    ToolUse {
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(other)]
    Other,
}

/// Asks a Claude model which tool fits a query.
///
/// Tools are sent natively; the first `tool_use` block of the reply is the
/// choice. A reply with text only means no tool matched.
pub struct AnthropicSelector {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    label: &'static str,
}

impl AnthropicSelector {
    /// Creates a selector posting to `url` (a Messages API endpoint).
    pub fn new(
        client: Client,
        url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            label: "claude",
        }
    }

    /// Overrides the name reported in logs and the CLI banner.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    fn build_request<'a>(&'a self, query: &'a str, tools: &'a [ToolSpec]) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: [Message {
                role: "user",
                content: query,
            }],
            tools: tools
                .iter()
                .map(|t| ClaudeTool {
                    name: &t.name,
                    description: &t.description,
                    input_schema: json!({"type": "object", "properties": {}}),
                })
                .collect(),
        }
    }

    fn choice_from(
        response: MessagesResponse,
        tools: &[ToolSpec],
    ) -> Result<ToolChoice, SelectorError> {
        let Some((name, input)) = response.content.into_iter().find_map(|block| match block {
            ContentBlock::ToolUse { name, input } => Some((name, input)),
            ContentBlock::Other => None,
        }) else {
            return Ok(ToolChoice::none());
        };

        if !tools.iter().any(|t| t.name == name) {
            return Err(SelectorError::InvalidResponse(format!(
                "model picked unoffered tool '{name}'"
            )));
        }

        let parameters = if input.is_object() {
            input
        } else {
            json!({})
        };

        Ok(ToolChoice {
            tool: Some(name),
            parameters,
        })
    }
}

#[async_trait]
impl ToolSelector for AnthropicSelector {
    fn name(&self) -> &'static str {
        self.label
    }

    async fn select(&self, query: &str, tools: &[ToolSpec]) -> Result<ToolChoice, SelectorError> {
        debug!(model = %self.model, "Asking Claude for a tool choice");

        let response = self
            .client
            .post(&self.url)
            .timeout(ANTHROPIC_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.build_request(query, tools))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "Anthropic request failed");
                SelectorError::Backend(e.to_string())
            })?;

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| SelectorError::InvalidResponse(e.to_string()))?;

        Self::choice_from(body, tools)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tools() -> Vec<ToolSpec> {
        ["duck", "cat"]
            .into_iter()
            .map(|name| ToolSpec {
                name: name.to_string(),
                description: format!("Get a random {name} image URL"),
            })
            .collect()
    }

    fn selector(server: &MockServer) -> AnthropicSelector {
        AnthropicSelector::new(
            Client::new(),
            format!("{}/v1/messages", server.uri()),
            "test-key",
            "claude-3-haiku-20240307",
            300,
        )
    }

    #[tokio::test]
    async fn test_select_reads_tool_use_block() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", ANTHROPIC_VERSION))
            .and(body_partial_json(json!({
                "model": "claude-3-haiku-20240307",
                "max_tokens": 300,
                "messages": [{"role": "user", "content": "quack quack"}],
                "tools": [
                    {"name": "duck", "input_schema": {"type": "object"}},
                    {"name": "cat"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_01",
                "type": "message",
                "role": "assistant",
                "content": [
                    {"type": "text", "text": "Let me get you a duck."},
                    {"type": "tool_use", "id": "toolu_01", "name": "duck", "input": {}}
                ],
                "stop_reason": "tool_use"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let choice = selector(&mock_server)
            .select("quack quack", &tools())
            .await
            .unwrap();

        assert_eq!(choice, ToolChoice::tool("duck"));
    }

    #[tokio::test]
    async fn test_text_only_reply_means_no_tool() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "text", "text": "I can't fetch giraffes."}],
                "stop_reason": "end_turn"
            })))
            .mount(&mock_server)
            .await;

        let choice = selector(&mock_server)
            .select("a giraffe", &tools())
            .await
            .unwrap();

        assert!(choice.tool.is_none());
    }

    #[tokio::test]
    async fn test_unoffered_tool_is_invalid() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{"type": "tool_use", "id": "toolu_02", "name": "dog", "input": {}}]
            })))
            .mount(&mock_server)
            .await;

        let result = selector(&mock_server).select("a dog", &tools()).await;

        assert!(matches!(result, Err(SelectorError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_select_backend_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&mock_server)
            .await;

        let result = selector(&mock_server).select("a duck", &tools()).await;

        assert!(matches!(result, Err(SelectorError::Backend(_))));
    }

    #[test]
    fn test_label_defaults_to_claude() {
        let selector = AnthropicSelector::new(Client::new(), "http://localhost/v1/messages", "k", "m", 10);
        assert_eq!(selector.name(), "claude");
        assert_eq!(selector.with_label("claude_sonnet").name(), "claude_sonnet");
    }
}
