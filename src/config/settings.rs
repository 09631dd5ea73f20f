// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Settings management for tapword
//!
//! Handles loading settings from ~/.tapword/settings.json

use serde::{Deserialize, Serialize};

mod io;
mod validation;

/// Main settings structure, stored in ~/.tapword/settings.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Language model service configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Next-word prediction settings
    #[serde(default)]
    pub prediction: PredictionConfig,

    /// Auto-correction settings
    #[serde(default)]
    pub correction: CorrectionConfig,

    /// Keyboard and editing behavior
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

/// Gemini API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (if stored directly, not recommended)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name for API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model to use for both prediction and correction
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for API (for custom endpoints)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            base_url: None,
        }
    }
}

/// Next-word prediction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionConfig {
    /// Number of trailing words sent as context
    #[serde(default = "default_context_words")]
    pub context_words: usize,

    /// Number of words the model is asked to predict
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,

    /// Sampling temperature
    #[serde(default = "default_prediction_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    pub top_p: f32,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            context_words: default_context_words(),
            max_suggestions: default_max_suggestions(),
            temperature: default_prediction_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// Auto-correction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionConfig {
    /// Correct the previous word when a space is typed
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Sampling temperature (kept low for deterministic spelling)
    #[serde(default = "default_correction_temperature")]
    pub temperature: f32,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temperature: default_correction_temperature(),
        }
    }
}

/// Keyboard and editing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardConfig {
    /// Quiet period after the last edit before suggestions are fetched
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Text the editor starts with
    #[serde(default = "default_initial_text")]
    pub initial_text: String,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            initial_text: default_initial_text(),
        }
    }
}

/// Fallback variable checked when `api_key_env` is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

fn default_api_key_env() -> String {
    "API_KEY".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_context_words() -> usize {
    10
}

fn default_max_suggestions() -> usize {
    5
}

fn default_prediction_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_correction_temperature() -> f32 {
    0.2
}

fn default_debounce_ms() -> u64 {
    200
}

fn default_initial_text() -> String {
    "The quick brown fox ".to_string()
}

fn default_true() -> bool {
    true
}
