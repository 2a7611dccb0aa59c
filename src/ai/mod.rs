//! Milestone suggestion client.
//!
//! Turns an objective into a prompt, asks a text-generation service for a JSON array
//! of milestones and parses the answer. Any failure degrades to an empty list: callers
//! cannot tell "the service failed" from "nothing was suggested", and neither is an
//! error for them.

/// Gemini `generateContent` transport
pub mod gemini;

pub use gemini::GeminiClient;

use crate::{
    entities::objective,
    errors::{Error, Result},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What the prompt is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionRequest {
    /// Objective name
    pub objective_name: String,
    /// Objective description, empty when the objective has none
    pub description: String,
    /// Target amount
    pub target_amount: f64,
    /// Currency code of the target amount
    pub currency: String,
}

impl SuggestionRequest {
    /// Builds a request from an objective's fields.
    #[must_use]
    pub fn from_objective(objective: &objective::Model) -> Self {
        Self {
            objective_name: objective.name.clone(),
            description: objective.description.clone().unwrap_or_default(),
            target_amount: objective.target_amount,
            currency: objective.target_currency.clone(),
        }
    }

    /// Natural-language instruction sent to the service.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Decomponha o objetivo financeiro \"{}\" ({}) com orçamento de {} {} em 5 a 8 \
             marcos (milestones) acionáveis, realistas e motivadores.",
            self.objective_name, self.description, self.target_amount, self.currency
        )
    }
}

/// One suggested milestone as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedMilestone {
    /// Short title
    pub title: String,
    /// What should be done
    pub description: String,
    /// Position suggested by the service
    pub order_index: i64,
}

/// A service that answers a suggestion request with raw response text.
#[async_trait]
pub trait MilestoneGenerator: Send + Sync {
    /// Sends the request and returns the generated text, expected to be a JSON array.
    async fn generate(&self, request: &SuggestionRequest) -> Result<String>;
}

/// Parses generated text into milestones.
///
/// The text must be a JSON array of objects with `title`, `description` and
/// `order_index`. A surrounding Markdown code fence is tolerated. The number of items is
/// not checked.
pub fn parse_suggestions(raw: &str) -> Result<Vec<SuggestedMilestone>> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(Error::Service {
            message: "Empty response from AI".to_string(),
        });
    }
    serde_json::from_str(body).map_err(Into::into)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_start_matches("json");
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Asks `generator` for milestone suggestions.
///
/// Never fails: errors are logged and yield an empty list.
pub async fn suggest_milestones(
    generator: &dyn MilestoneGenerator,
    request: &SuggestionRequest,
) -> Vec<SuggestedMilestone> {
    let outcome = match generator.generate(request).await {
        Ok(raw) => parse_suggestions(&raw),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(suggestions) => {
            tracing::info!(
                "Received {} milestone suggestions for '{}'",
                suggestions.len(),
                request.objective_name
            );
            suggestions
        }
        Err(e) => {
            tracing::error!("Milestone generation failed: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::test_objective_model;

    /// Generator answering with a fixed result.
    pub(crate) struct FixedGenerator(pub(crate) std::result::Result<String, String>);

    #[async_trait]
    impl MilestoneGenerator for FixedGenerator {
        async fn generate(&self, _request: &SuggestionRequest) -> Result<String> {
            self.0.clone().map_err(|message| Error::Service { message })
        }
    }

    fn request() -> SuggestionRequest {
        SuggestionRequest {
            objective_name: "Intercâmbio Irlanda".to_string(),
            description: "Viagem de estudos".to_string(),
            target_amount: 50000.0,
            currency: "BRL".to_string(),
        }
    }

    #[test]
    fn test_prompt_embeds_objective_fields() {
        let prompt = request().prompt();
        assert!(prompt.contains("\"Intercâmbio Irlanda\""));
        assert!(prompt.contains("(Viagem de estudos)"));
        assert!(prompt.contains("50000 BRL"));
        assert!(prompt.contains("5 a 8"));
    }

    #[test]
    fn test_request_from_objective_without_description() {
        let mut objective = test_objective_model("Moto", 15000.0);
        objective.description = None;
        let request = SuggestionRequest::from_objective(&objective);
        assert_eq!(request.description, "");
        assert_eq!(request.currency, "BRL");
        assert_eq!(request.target_amount, 15000.0);
    }

    #[test]
    fn test_parse_valid_array() {
        let raw = r#"[
            {"title": "Tirar passaporte", "description": "Agendar na PF", "order_index": 1},
            {"title": "Comprar passagem", "description": "Pesquisar preços", "order_index": 2}
        ]"#;
        let parsed = parse_suggestions(raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].title, "Comprar passagem");
        assert_eq!(parsed[1].order_index, 2);
    }

    #[test]
    fn test_parse_fenced_array() {
        let raw = "```json\n[{\"title\": \"a\", \"description\": \"b\", \"order_index\": 0}]\n```";
        assert_eq!(parse_suggestions(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_rejects_non_conforming() {
        for raw in [
            "",
            "   ",
            "not json",
            r#"{"title": "a", "description": "b", "order_index": 0}"#,
            r#"[{"title": "a"}]"#,
            r#"[{"title": "a", "description": "b", "order_index": "first"}]"#,
        ] {
            assert!(parse_suggestions(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_suggest_returns_parsed_items() {
        let generator = FixedGenerator(Ok(
            r#"[{"title": "a", "description": "b", "order_index": 0}]"#.to_string(),
        ));
        let suggestions = suggest_milestones(&generator, &request()).await;
        assert_eq!(suggestions.len(), 1);
    }

    #[tokio::test]
    async fn test_suggest_degrades_to_empty_list() {
        let failing = FixedGenerator(Err("network down".to_string()));
        assert!(suggest_milestones(&failing, &request()).await.is_empty());

        let not_array = FixedGenerator(Ok(r#"{"milestones": []}"#.to_string()));
        assert!(suggest_milestones(&not_array, &request()).await.is_empty());

        let empty = FixedGenerator(Ok("[]".to_string()));
        assert!(suggest_milestones(&empty, &request()).await.is_empty());
    }
}
