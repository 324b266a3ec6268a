//! Google Gemini client for the generative analysis path.
//!
//! Talks to the native Gemini `generateContent` endpoint. Auth is via the
//! `?key=API_KEY` query parameter. The request asks for a JSON response
//! (`responseMimeType: "application/json"`) so the verdict can be parsed
//! without stripping markdown fences.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::ai::GenerativeClient;
use crate::config::AnalyzerConfig;
use crate::error::AiError;

/// The default Google Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini API client.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout_secs: u64,
    max_output_tokens: u32,
    temperature: f32,
}

impl GeminiClient {
    /// Create a new Gemini client from configuration.
    ///
    /// Returns `AiError::MissingCredential` if no API key is configured.
    pub fn new(config: &AnalyzerConfig) -> Result<Self, AiError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or(AiError::MissingCredential)?;

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AiError::Connection {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
        })
    }

    /// Build the JSON request body for the `generateContent` call.
    fn build_request_body(&self, prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": prompt}],
            }],
            "generationConfig": {
                "maxOutputTokens": self.max_output_tokens,
                "temperature": self.temperature,
                "responseMimeType": "application/json",
            },
        })
    }

    /// Build the endpoint URL with the `?key=` query parameter.
    fn endpoint_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    /// Map an HTTP status code to the appropriate `AiError`.
    fn map_http_error(status: reqwest::StatusCode, body_text: &str) -> AiError {
        match status.as_u16() {
            401 => AiError::AuthFailed,
            403 => AiError::Forbidden,
            429 => AiError::QuotaExceeded {
                message: format!("HTTP 429 from Gemini API: {}", truncate(body_text, 200)),
            },
            _ if body_text.contains("quota") || body_text.contains("RESOURCE_EXHAUSTED") => {
                AiError::QuotaExceeded {
                    message: format!("HTTP {} from Gemini API: {}", status, truncate(body_text, 200)),
                }
            }
            _ => AiError::ApiRequest {
                message: format!("HTTP {} from Gemini API: {}", status, truncate(body_text, 200)),
            },
        }
    }

    /// Extract the generated text from a Gemini response body:
    /// the concatenated `text` parts of the first candidate.
    fn extract_text(body: &Value) -> Result<String, AiError> {
        let candidates = body["candidates"]
            .as_array()
            .ok_or_else(|| AiError::ResponseParse {
                message: "Missing 'candidates' array in response".to_string(),
            })?;

        let candidate = candidates.first().ok_or_else(|| AiError::ResponseParse {
            message: "Empty 'candidates' array in response".to_string(),
        })?;

        let parts = candidate["content"]["parts"]
            .as_array()
            .ok_or_else(|| AiError::ResponseParse {
                message: "Missing 'parts' array in candidate content".to_string(),
            })?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.is_empty() {
            return Err(AiError::ResponseParse {
                message: "No text parts in candidate content".to_string(),
            });
        }

        Ok(text)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        let url = self.endpoint_url();
        let body = self.build_request_body(prompt);

        debug!(model = self.model.as_str(), "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else if e.is_connect() {
                    AiError::Connection {
                        message: format!("Connection to Gemini API failed: {}", e),
                    }
                } else {
                    AiError::ApiRequest {
                        message: format!("Request to Gemini API failed: {}", e),
                    }
                }
            })?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| AiError::ResponseParse {
            message: format!("Failed to read response body: {}", e),
        })?;

        if !status.is_success() {
            return Err(Self::map_http_error(status, &body_text));
        }

        let response_json: Value =
            serde_json::from_str(&body_text).map_err(|e| AiError::ResponseParse {
                message: format!("Invalid JSON in response: {}", e),
            })?;

        Self::extract_text(&response_json)
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
