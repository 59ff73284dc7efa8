//! Keyword-based tool selection.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::domain::entities::AnimalKind;
use crate::domain::gateways::{SelectorError, ToolChoice, ToolSelector, ToolSpec};

/// Matches a supported animal name as a whole word, singular or plural.
static ANIMAL_WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(duck|dog|cat)s?\b").unwrap());

/// Picks the animal tool named earliest in the query.
///
/// Needs no network and never fails, which makes it the fallback when an
/// LLM-backed selector is unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordSelector;

impl KeywordSelector {
    pub fn new() -> Self {
        Self
    }

    /// Returns the first animal mentioned in `query`, if any.
    pub fn extract_animal(query: &str) -> Option<AnimalKind> {
        let lower = query.to_lowercase();
        ANIMAL_WORD_REGEX
            .captures(&lower)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

#[async_trait]
impl ToolSelector for KeywordSelector {
    fn name(&self) -> &'static str {
        "keyword"
    }

    async fn select(&self, query: &str, tools: &[ToolSpec]) -> Result<ToolChoice, SelectorError> {
        let choice = Self::extract_animal(query)
            .filter(|animal| tools.iter().any(|t| t.name == animal.as_str()))
            .map(|animal| ToolChoice::tool(animal.as_str()))
            .unwrap_or_else(ToolChoice::none);

        Ok(choice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal_tools() -> Vec<ToolSpec> {
        AnimalKind::ALL
            .iter()
            .map(|a| ToolSpec {
                name: a.as_str().to_string(),
                description: String::new(),
            })
            .collect()
    }

    #[test]
    fn test_extract_animal() {
        assert_eq!(
            KeywordSelector::extract_animal("Show me a DUCK please"),
            Some(AnimalKind::Duck)
        );
        assert_eq!(
            KeywordSelector::extract_animal("I love cats"),
            Some(AnimalKind::Cat)
        );
        assert_eq!(KeywordSelector::extract_animal("a giraffe"), None);
        assert_eq!(KeywordSelector::extract_animal("hotdog stand"), None);
    }

    #[test]
    fn test_extract_animal_prefers_earliest_mention() {
        assert_eq!(
            KeywordSelector::extract_animal("not a cat, a dog"),
            Some(AnimalKind::Cat)
        );
    }

    #[tokio::test]
    async fn test_select_known_animal() {
        let choice = KeywordSelector::new()
            .select("gimme dogs", &animal_tools())
            .await
            .unwrap();

        assert_eq!(choice.tool.as_deref(), Some("dog"));
        assert!(choice.parameters.as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_nothing_matches() {
        let choice = KeywordSelector::new()
            .select("I want a giraffe", &animal_tools())
            .await
            .unwrap();

        assert_eq!(choice, ToolChoice::none());
    }

    #[tokio::test]
    async fn test_select_ignores_tools_not_offered() {
        let choice = KeywordSelector::new()
            .select("duck", &[])
            .await
            .unwrap();

        assert!(choice.tool.is_none());
    }
}
