//! Ollama-backed tool selection.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::gateways::{SelectorError, ToolChoice, ToolSelector, ToolSpec};

const OLLAMA_TIMEOUT: Duration = Duration::from_secs(30);

/// Outermost `{ ... }` span of a model reply.
static JSON_OBJECT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").unwrap());

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Asks an Ollama model which tool fits a query.
pub struct OllamaSelector {
    client: Client,
    url: String,
    model: String,
}

impl OllamaSelector {
    /// Creates a selector posting to `url` (an Ollama `/api/generate` endpoint).
    pub fn new(client: Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            model: model.into(),
        }
    }

    fn build_prompt(query: &str, tools: &[ToolSpec]) -> String {
        let tools_json = serde_json::to_string_pretty(tools).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"You are an AI assistant that can call tools.

Available tools:
{tools_json}

User query: {query}

Respond with ONLY a JSON object: {{"tool": "tool_name", "parameters": {{}}}}
If no tool matches, respond with: {{"tool": null, "parameters": {{}}}}

Examples:
- "Show me a duck" -> {{"tool": "duck", "parameters": {{}}}}
- "I want a giraffe" -> {{"tool": null, "parameters": {{}}}}
"#
        )
    }

    /// Extracts a tool choice from free-form model output.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError::InvalidResponse`] if no JSON object with a
    /// `tool` field can be found.
    pub fn parse_reply(reply: &str) -> Result<ToolChoice, SelectorError> {
        let json = JSON_OBJECT_REGEX
            .find(reply)
            .map(|m| m.as_str())
            .ok_or_else(|| SelectorError::InvalidResponse(format!("no JSON object in: {reply}")))?;

        let mut choice: ToolChoice = serde_json::from_str(json)
            .map_err(|e| SelectorError::InvalidResponse(format!("{e}: {json}")))?;

        if matches!(choice.tool.as_deref(), Some("") | Some("null")) {
            choice.tool = None;
        }

        Ok(choice)
    }
}

#[async_trait]
impl ToolSelector for OllamaSelector {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn select(&self, query: &str, tools: &[ToolSpec]) -> Result<ToolChoice, SelectorError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: Self::build_prompt(query, tools),
            stream: false,
        };

        debug!(model = %self.model, "Asking Ollama for a tool choice");

        let response = self
            .client
            .post(&self.url)
            .timeout(OLLAMA_TIMEOUT)
            .json(&request)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!(error = %e, "Ollama request failed");
                SelectorError::Backend(e.to_string())
            })?;

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| SelectorError::InvalidResponse(e.to_string()))?;

        Self::parse_reply(&body.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn tools() -> Vec<ToolSpec> {
        vec![ToolSpec {
            name: "duck".to_string(),
            description: "Get a random duck image".to_string(),
        }]
    }

    #[test]
    fn test_parse_reply_with_surrounding_text() {
        let choice = OllamaSelector::parse_reply(
            "Sure! Here you go:\n{\"tool\": \"duck\", \"parameters\": {}}\nEnjoy.",
        )
        .unwrap();

        assert_eq!(choice.tool.as_deref(), Some("duck"));
    }

    #[test]
    fn test_parse_reply_null_tool() {
        let choice = OllamaSelector::parse_reply(r#"{"tool": null, "parameters": {}}"#).unwrap();
        assert!(choice.tool.is_none());

        let choice = OllamaSelector::parse_reply(r#"{"tool": "null"}"#).unwrap();
        assert!(choice.tool.is_none());
    }

    #[test]
    fn test_parse_reply_without_json() {
        let result = OllamaSelector::parse_reply("I think you want a duck.");
        assert!(matches!(result, Err(SelectorError::InvalidResponse(_))));
    }

    #[test]
    fn test_prompt_lists_tools_and_query() {
        let prompt = OllamaSelector::build_prompt("show me a duck", &tools());

        assert!(prompt.contains("\"name\": \"duck\""));
        assert!(prompt.contains("User query: show me a duck"));
    }

    #[tokio::test]
    async fn test_select_posts_generate_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(json!({"model": "llama3.2:3b", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "{\"tool\": \"duck\", \"parameters\": {}}"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let selector = OllamaSelector::new(
            Client::new(),
            format!("{}/api/generate", mock_server.uri()),
            "llama3.2:3b",
        );

        let choice = selector.select("a duck please", &tools()).await.unwrap();

        assert_eq!(choice.tool.as_deref(), Some("duck"));
    }

    #[tokio::test]
    async fn test_select_backend_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let selector = OllamaSelector::new(Client::new(), mock_server.uri(), "llama3.2:3b");

        let result = selector.select("a duck please", &tools()).await;

        assert!(matches!(result, Err(SelectorError::Backend(_))));
    }
}
