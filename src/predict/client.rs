// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompted query client
//!
//! Turns document text into prediction and correction requests and parses
//! the structured answers. Prediction failures are errors the caller must
//! surface; correction failures degrade silently to the original word.

use std::sync::Arc;

use serde::Deserialize;

use super::prompts::{
    context_window, correction_prompt, next_words_prompt, CORRECTED_WORD_DESCRIPTION,
    CORRECTED_WORD_FIELD, PREDICTED_WORD_DESCRIPTION,
};
use crate::config::{PredictionConfig, Settings};
use crate::error::{ApiError, Result, TapwordError};
use crate::llm::provider::{GenerateRequest, LlmProvider, ResponseSchema};

/// Client for the two structured queries the keyboard makes
#[derive(Clone)]
pub struct QueryClient {
    provider: Arc<dyn LlmProvider>,
    prediction: PredictionConfig,
    correction_temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CorrectionPayload {
    #[serde(rename = "correctedWord")]
    corrected_word: String,
}

impl QueryClient {
    /// Create a client with default prediction and correction parameters
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        let settings = Settings::default();
        Self::from_settings(provider, &settings)
    }

    /// Create a client using the sampling parameters from `settings`
    pub fn from_settings(provider: Arc<dyn LlmProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            prediction: settings.prediction.clone(),
            correction_temperature: settings.correction.temperature,
        }
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Predict the words most likely to follow `text`.
    ///
    /// Blank input returns an empty list without contacting the service.
    /// Longer answers are cut to `max_suggestions` words.
    pub async fn request_next_words(&self, text: &str) -> Result<Vec<String>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        let context = context_window(trimmed, self.prediction.context_words);
        let request = GenerateRequest::new(
            next_words_prompt(&context, self.prediction.max_suggestions),
            ResponseSchema::string_array(PREDICTED_WORD_DESCRIPTION),
        )
        .with_temperature(self.prediction.temperature)
        .with_top_p(self.prediction.top_p);

        tracing::debug!(target: "tapword.predict", %context, "requesting next words");

        let raw = self.provider.generate(request).await.inspect_err(|error| {
            tracing::warn!(target: "tapword.predict", %error, "next-word request failed");
        })?;

        let mut words = parse_word_list(&raw).inspect_err(|error| {
            tracing::warn!(target: "tapword.predict", %error, raw = %raw, "unexpected prediction payload");
        })?;
        words.truncate(self.prediction.max_suggestions);
        Ok(words)
    }

    /// Spell-correct a single word.
    ///
    /// Never fails: any transport or shape problem yields `word` unchanged.
    pub async fn request_correction(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let request = GenerateRequest::new(
            correction_prompt(word),
            ResponseSchema::single_string(CORRECTED_WORD_FIELD, CORRECTED_WORD_DESCRIPTION),
        )
        .with_temperature(self.correction_temperature);

        let raw = match self.provider.generate(request).await {
            Ok(raw) => raw,
            Err(error) => {
                tracing::warn!(target: "tapword.correct", %error, word, "correction request failed");
                return word.to_string();
            }
        };

        match parse_correction(&raw) {
            Some(corrected) => {
                tracing::debug!(target: "tapword.correct", word, %corrected, "correction received");
                corrected
            }
            None => {
                tracing::warn!(target: "tapword.correct", raw = %raw, word, "unexpected correction payload");
                word.to_string()
            }
        }
    }
}

/// Parse a JSON array of strings. Any other shape is an invalid response.
pub fn parse_word_list(raw: &str) -> Result<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw.trim()).map_err(|e| {
        TapwordError::Api(ApiError::InvalidResponse(format!(
            "expected a JSON array of strings: {e}"
        )))
    })
}

/// Parse `{"correctedWord": "..."}`, returning `None` on any mismatch.
pub fn parse_correction(raw: &str) -> Option<String> {
    serde_json::from_str::<CorrectionPayload>(raw.trim())
        .ok()
        .map(|payload| payload.corrected_word)
}
