// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Google Gemini API provider implementation
//!
//! Implements the LlmProvider trait on top of `generateContent` with
//! JSON-constrained output.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::common::{parse_retry_after_seconds, server_error, transport_error};
use crate::error::{ApiError, Result, TapwordError};
use crate::llm::provider::{GenerateRequest, LlmProvider};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini provider
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, GEMINI_API_URL)
    }

    /// Create with a custom base URL
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Model this provider sends requests to
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Build the request body
    fn build_request(&self, request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: Some(request.prompt.clone()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: request.schema.to_json(),
                temperature: Some(request.temperature),
                top_p: request.top_p,
            },
        }
    }

    /// Parse an error response
    fn parse_error(&self, status: u16, body: &str, retry_after: Option<u64>) -> TapwordError {
        let parsed = serde_json::from_str::<GeminiErrorResponse>(body).ok();
        let (message, code) = match &parsed {
            Some(resp) => (resp.error.message.clone(), resp.error.status.as_str()),
            None => (body.to_string(), ""),
        };

        match (status, code) {
            (401 | 403, _) | (_, "UNAUTHENTICATED" | "PERMISSION_DENIED") => {
                TapwordError::Api(ApiError::AuthenticationFailed)
            }
            (429, _) | (_, "RESOURCE_EXHAUSTED") => {
                let retry_secs = u32::try_from(retry_after.unwrap_or(10)).unwrap_or(u32::MAX);
                TapwordError::Api(ApiError::RateLimited(retry_secs))
            }
            (404, _) | (_, "NOT_FOUND") => {
                TapwordError::Api(ApiError::ModelNotFound(self.model.clone()))
            }
            (504, _) | (_, "DEADLINE_EXCEEDED") => TapwordError::Api(ApiError::Timeout),
            (400, "INVALID_ARGUMENT") if message.contains("API key") => {
                TapwordError::Api(ApiError::AuthenticationFailed)
            }
            _ => server_error(status, message),
        }
    }

    /// Pull the generated text out of a successful response
    fn extract_text(response: GeminiResponse) -> Result<String> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(TapwordError::Api(ApiError::Blocked(reason)));
        }

        let candidate = response.candidates.into_iter().next().ok_or_else(|| {
            TapwordError::Api(ApiError::InvalidResponse(
                "response contained no candidates".to_string(),
            ))
        })?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            let reason = candidate
                .finish_reason
                .unwrap_or_else(|| "UNKNOWN".to_string());
            if reason == "SAFETY" || reason == "RECITATION" || reason == "BLOCKLIST" {
                return Err(TapwordError::Api(ApiError::Blocked(reason)));
            }
            return Err(TapwordError::Api(ApiError::InvalidResponse(format!(
                "candidate has no text (finish reason {reason})"
            ))));
        }

        Ok(text)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let body = self.build_request(&request);

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();

        if !response.status().is_success() {
            // Extract Retry-After header before consuming response body
            let retry_after = parse_retry_after_seconds(response.headers());
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(target: "tapword.llm.gemini", status, "generateContent failed");
            return Err(self.parse_error(status, &body, retry_after));
        }

        let api_response: GeminiResponse = response.json().await.map_err(|e| {
            TapwordError::Api(ApiError::InvalidResponse(format!(
                "could not decode response body: {e}"
            )))
        })?;

        Self::extract_text(api_response)
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::ResponseSchema;

    fn provider() -> GeminiProvider {
        GeminiProvider::new("test-key", "gemini-2.5-flash")
    }

    #[test]
    fn test_endpoint() {
        let provider = GeminiProvider::with_base_url("k", "gemini-2.5-flash", "http://localhost:1/");
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_build_request_body() {
        let request = GenerateRequest::new("Text: \"hi\"", ResponseSchema::string_array("w"))
            .with_temperature(0.7)
            .with_top_p(0.9);
        let body = serde_json::to_value(provider().build_request(&request)).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Text: \"hi\"");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "ARRAY");
        assert!(body["generationConfig"]["topP"].is_number());
    }

    #[test]
    fn test_build_request_omits_top_p_when_unset() {
        let request = GenerateRequest::new("w", ResponseSchema::single_string("correctedWord", "d"));
        let body = serde_json::to_value(provider().build_request(&request)).unwrap();

        assert!(body["generationConfig"].get("topP").is_none());
    }

    #[test]
    fn test_parse_error_authentication() {
        let body = r#"{"error": {"code": 403, "message": "denied", "status": "PERMISSION_DENIED"}}"#;
        match provider().parse_error(403, body, None) {
            TapwordError::Api(ApiError::AuthenticationFailed) => {}
            other => panic!("Expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_invalid_api_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        match provider().parse_error(400, body, None) {
            TapwordError::Api(ApiError::AuthenticationFailed) => {}
            other => panic!("Expected AuthenticationFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_rate_limit() {
        let body = r#"{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#;

        match provider().parse_error(429, body, None) {
            TapwordError::Api(ApiError::RateLimited(secs)) => assert_eq!(secs, 10),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
        match provider().parse_error(429, body, Some(30)) {
            TapwordError::Api(ApiError::RateLimited(secs)) => assert_eq!(secs, 30),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_rate_limit_huge_retry_after_saturates() {
        let body = r#"{"error": {"code": 429, "message": "quota", "status": "RESOURCE_EXHAUSTED"}}"#;
        match provider().parse_error(429, body, Some(u64::from(u32::MAX) + 5)) {
            TapwordError::Api(ApiError::RateLimited(secs)) => assert_eq!(secs, u32::MAX),
            other => panic!("Expected RateLimited, got {other:?}"),
        }
    }

    #[test]
    fn test_model_accessor() {
        assert_eq!(provider().model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_parse_error_model_not_found() {
        let body = r#"{"error": {"code": 404, "message": "no such model", "status": "NOT_FOUND"}}"#;
        match provider().parse_error(404, body, None) {
            TapwordError::Api(ApiError::ModelNotFound(model)) => {
                assert_eq!(model, "gemini-2.5-flash")
            }
            other => panic!("Expected ModelNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_unstructured_body() {
        match provider().parse_error(502, "bad gateway", None) {
            TapwordError::Api(ApiError::ServerError { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "bad gateway");
            }
            other => panic!("Expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "[\"a\","}, {"text": "\"b\"]"}]}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiProvider::extract_text(response).unwrap(), r#"["a","b"]"#);
    }

    #[test]
    fn test_extract_text_prompt_blocked() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        match GeminiProvider::extract_text(response) {
            Err(TapwordError::Api(ApiError::Blocked(reason))) => assert_eq!(reason, "SAFETY"),
            other => panic!("Expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            GeminiProvider::extract_text(response),
            Err(TapwordError::Api(ApiError::InvalidResponse(_)))
        ));
    }
}
