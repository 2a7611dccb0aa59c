//! Gemini `generateContent` transport for milestone suggestions.
//!
//! The request asks for `application/json` output constrained by a response schema
//! describing an array of `{title, description, order_index}` objects.

use super::{MilestoneGenerator, SuggestionRequest};
use crate::{
    config::app::AiConfig,
    errors::{Error, Result},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

/// Client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated. None when there is no text.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    /// Creates a client. Without an API key every request fails, which callers see as
    /// an empty suggestion list.
    pub fn new(config: &AiConfig, api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .inspect_err(|e| tracing::error!("Failed to build HTTP client: {e}"))?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// JSON body of a `generateContent` call for `prompt`.
    #[must_use]
    pub fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "title": { "type": "STRING", "description": "Título curto do marco" },
                            "description": {
                                "type": "STRING",
                                "description": "Explicação breve do que deve ser feito"
                            },
                            "order_index": { "type": "INTEGER", "description": "Ordem sequencial" }
                        },
                        "required": ["title", "description", "order_index"]
                    }
                }
            }
        })
    }
}

#[async_trait]
impl MilestoneGenerator for GeminiClient {
    async fn generate(&self, request: &SuggestionRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| Error::Config {
            message: "GEMINI_API_KEY is not set".to_string(),
        })?;

        tracing::debug!("Requesting milestone suggestions from {}", self.model);
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(&request.prompt()))
            .send()
            .await?
            .error_for_status()?;

        let body: GenerateContentResponse = response.json().await?;
        body.text().ok_or_else(|| Error::Service {
            message: "Empty response from AI".to_string(),
        })
    }
}
