//! Tool selectors turning free-text queries into tool choices.
//!
//! - [`KeywordSelector`] - Offline animal-name matching, always available
//! - [`OllamaSelector`] - Asks a local Ollama model to pick a tool
//! - [`AnthropicSelector`] - Asks Claude through the Messages API

mod anthropic;
mod keyword;
mod ollama;

pub use anthropic::AnthropicSelector;
pub use keyword::KeywordSelector;
pub use ollama::OllamaSelector;

use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::{AiBackend, Config};
use crate::domain::gateways::{ToolChoice, ToolSelector, ToolSpec};

/// Builds the selector named by `config.ai_backend`.
///
/// The LLM selectors share `client` (and its connection pool). A Claude
/// backend without an API key degrades to keyword matching.
pub fn from_config(config: &Config, client: Client) -> Arc<dyn ToolSelector> {
    match config.ai_backend {
        AiBackend::Keyword => {
            info!("Tool selection: keyword matching");
            Arc::new(KeywordSelector::new())
        }
        AiBackend::Ollama => {
            info!(model = %config.ollama_model, url = %config.ollama_url, "Tool selection: Ollama");
            Arc::new(OllamaSelector::new(
                client,
                config.ollama_url.clone(),
                config.ollama_model.clone(),
            ))
        }
        backend @ (AiBackend::ClaudeHaiku | AiBackend::ClaudeSonnet) => {
            let (Some((model, max_tokens)), Some(api_key)) =
                (backend.claude_model(), config.anthropic_api_key.as_deref())
            else {
                warn!(backend = %backend, "ANTHROPIC_API_KEY not set, using keyword matching");
                return Arc::new(KeywordSelector::new());
            };

            info!(model, url = %config.anthropic_url, "Tool selection: Claude");
            Arc::new(
                AnthropicSelector::new(
                    client,
                    config.anthropic_url.clone(),
                    api_key,
                    model,
                    max_tokens,
                )
                .with_label(backend.as_str()),
            )
        }
    }
}

/// Asks `selector`, falling back to keyword matching if it fails.
pub async fn select_with_fallback(
    selector: &dyn ToolSelector,
    query: &str,
    tools: &[ToolSpec],
) -> ToolChoice {
    match selector.select(query, tools).await {
        Ok(choice) => choice,
        Err(e) => {
            warn!(
                selector = selector.name(),
                error = %e,
                "Tool selection failed, using keyword matching"
            );
            let keyword = KeywordSelector::new();
            keyword
                .select(query, tools)
                .await
                .unwrap_or_else(|_| ToolChoice::none())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gateways::{MockToolSelector, SelectorError};

    fn tools() -> Vec<ToolSpec> {
        vec![ToolSpec {
            name: "cat".to_string(),
            description: "Get a random cat image URL".to_string(),
        }]
    }

    #[test]
    fn test_from_config_picks_backend() {
        let mut config = Config::default();
        assert_eq!(from_config(&config, Client::new()).name(), "keyword");

        config.ai_backend = AiBackend::Ollama;
        assert_eq!(from_config(&config, Client::new()).name(), "ollama");

        config.ai_backend = AiBackend::ClaudeSonnet;
        config.anthropic_api_key = Some("sk-test".to_string());
        assert_eq!(from_config(&config, Client::new()).name(), "claude_sonnet");
    }

    #[test]
    fn test_claude_without_key_uses_keywords() {
        let config = Config {
            ai_backend: AiBackend::ClaudeHaiku,
            ..Config::default()
        };

        assert_eq!(from_config(&config, Client::new()).name(), "keyword");
    }

    #[tokio::test]
    async fn test_uses_primary_choice() {
        let mut selector = MockToolSelector::new();
        selector
            .expect_select()
            .returning(|_, _| Ok(ToolChoice::tool("cat")));

        let choice = select_with_fallback(&selector, "anything", &tools()).await;

        assert_eq!(choice.tool.as_deref(), Some("cat"));
    }

    #[tokio::test]
    async fn test_falls_back_to_keywords() {
        let mut selector = MockToolSelector::new();
        selector.expect_name().return_const("ollama");
        selector
            .expect_select()
            .returning(|_, _| Err(SelectorError::Backend("connection refused".to_string())));

        let choice = select_with_fallback(&selector, "a cat please", &tools()).await;

        assert_eq!(choice.tool.as_deref(), Some("cat"));
    }
}
