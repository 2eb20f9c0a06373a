//! Gemini `generateContent` client

use async_trait::async_trait;
use ie_core::config::AdvisoryConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::AdvisoryError;
use crate::generator::TextGenerator;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text parts of the first candidate, concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Client for the hosted Gemini model
///
/// Each call is a single attempt; nothing is retried.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone().filter(|k| !k.trim().is_empty()),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisoryError::MissingApiKey)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AdvisoryError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str, api_key: Option<&str>) -> AdvisoryConfig {
        AdvisoryConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.5-flash".to_string(),
            base_url: base_url.to_string(),
            timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Assess this"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "On track. "}, {"text": "Monitor rains."}]}
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&server.uri(), Some("test-key"))).unwrap();
        let text = client.generate("Assess this").await.unwrap();
        assert_eq!(text, "On track. Monitor rains.");
    }

    #[tokio::test]
    async fn test_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&server.uri(), Some("k"))).unwrap();
        let err = client.generate("x").await.unwrap_err();
        assert!(matches!(err, AdvisoryError::Api { status: 503, ref body } if body == "overloaded"));
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&server.uri(), Some("  "))).unwrap();
        assert!(matches!(
            client.generate("x").await,
            Err(AdvisoryError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&config(&format!("{}/", server.uri()), Some("k"))).unwrap();
        assert_eq!(client.generate("x").await.unwrap(), "");
    }
}
