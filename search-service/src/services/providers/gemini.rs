//! Gemini AI provider implementation.
//!
//! Implements text generation using Google's Gemini `generateContent` API.

use super::{FinishReason, ProviderError, ProviderResponse, TextProvider};
use crate::config::{GeminiSettings, DEFAULT_GEMINI_API_BASE};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Header carrying the API key. Kept out of the URL so that transport
/// errors, which embed the URL, never expose the key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub api_base: String,
    pub timeout: Option<Duration>,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            api_base: DEFAULT_GEMINI_API_BASE.to_string(),
            timeout: None,
        }
    }
}

impl From<&GeminiSettings> for GeminiConfig {
    fn from(settings: &GeminiSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            api_base: settings.api_base.clone(),
            timeout: settings.timeout,
        }
    }
}

/// Gemini text provider.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Build the `generateContent` URL for a model.
    ///
    /// Accepts both `gemini-2.5-flash` and `models/gemini-2.5-flash`.
    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        tracing::debug!(
            model = %model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.generate_url(model))
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status,
                api_error_message(&error_text)
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        extract_response(model, api_response)
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        // Listing models verifies both reachability and the key.
        let url = format!("{}/models", self.config.api_base.trim_end_matches('/'));

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.without_url().to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

/// Pull the generated text out of a `generateContent` response.
///
/// The text is the concatenation of the first candidate's text parts. A
/// candidate whose only part is `""` yields an empty answer; a response with
/// no text parts at all is an error.
fn extract_response(
    model: &str,
    api_response: GenerateContentResponse,
) -> Result<ProviderResponse, ProviderError> {
    let usage = api_response.usage_metadata.unwrap_or_default();

    let Some(candidate) = api_response.candidates.into_iter().next() else {
        if let Some(reason) = api_response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            tracing::warn!(model = %model, block_reason = %reason, "Prompt blocked by Gemini");
            return Err(ProviderError::ContentFiltered);
        }
        return Err(ProviderError::EmptyResponse(model.to_string()));
    };

    let finish_reason = FinishReason::from_gemini(candidate.finish_reason.as_deref());

    let texts: Vec<String> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if texts.is_empty() {
        return Err(if finish_reason == FinishReason::ContentFilter {
            ProviderError::ContentFiltered
        } else {
            ProviderError::EmptyResponse(model.to_string())
        });
    }

    Ok(ProviderResponse {
        text: texts.concat(),
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
        finish_reason,
    })
}

/// Prefer the `error.message` field of a Gemini error body over the raw JSON.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

/// Only text parts are produced or consumed; other part kinds deserialize
/// with `text: None` and are skipped.
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("valid response JSON")
    }

    #[test]
    fn generate_url_normalizes_models_prefix() {
        let provider = GeminiTextProvider::new(GeminiConfig::new("k")).unwrap();
        assert_eq!(
            provider.generate_url("models/gemini-2.5-flash"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            provider.generate_url("gemini-flash-latest"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-flash-latest:generateContent"
        );
    }

    #[test]
    fn request_serializes_as_single_user_turn() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some("What is AI?".to_string()),
                }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"contents": [{"role": "user", "parts": [{"text": "What is AI?"}]}]})
        );
    }

    #[test]
    fn extracts_and_joins_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "AI is "}, {"text": "artificial intelligence"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 4, "candidatesTokenCount": 6, "totalTokenCount": 10}
        }));

        let result = extract_response("gemini-2.5-flash", response).unwrap();
        assert_eq!(result.text, "AI is artificial intelligence");
        assert_eq!(result.input_tokens, 4);
        assert_eq!(result.output_tokens, 6);
        assert_eq!(result.finish_reason, FinishReason::Complete);
    }

    #[test]
    fn empty_text_part_is_a_valid_answer() {
        let response = parse(json!({
            "candidates": [{"content": {"parts": [{"text": ""}]}, "finishReason": "STOP"}]
        }));
        assert_eq!(extract_response("m", response).unwrap().text, "");
    }

    #[test]
    fn no_candidates_is_empty_response_error() {
        let err = extract_response("m", parse(json!({}))).unwrap_err();
        assert_eq!(err, ProviderError::EmptyResponse("m".to_string()));
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let response = parse(json!({"promptFeedback": {"blockReason": "SAFETY"}}));
        assert_eq!(
            extract_response("m", response).unwrap_err(),
            ProviderError::ContentFiltered
        );
    }

    #[test]
    fn safety_stop_without_text_is_content_filtered() {
        let response = parse(json!({"candidates": [{"finishReason": "SAFETY"}]}));
        assert_eq!(
            extract_response("m", response).unwrap_err(),
            ProviderError::ContentFiltered
        );
    }

    #[test]
    fn api_error_message_prefers_structured_message() {
        let body = r#"{"error": {"code": 404, "message": "models/nope is not found", "status": "NOT_FOUND"}}"#;
        assert_eq!(api_error_message(body), "models/nope is not found");
        assert_eq!(api_error_message("  upstream down \n"), "upstream down");
    }
}
