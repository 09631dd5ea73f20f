// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use crate::error::{Result, TapwordError};

use super::{Settings, FALLBACK_API_KEY_ENV};

impl Settings {
    /// Get the API key, checking env vars first.
    pub fn get_api_key(&self) -> Option<String> {
        // Priority: configured env var > fallback env var > config file.
        std::env::var(&self.provider.api_key_env)
            .ok()
            .or_else(|| std::env::var(FALLBACK_API_KEY_ENV).ok())
            .or_else(|| self.provider.api_key.clone())
            .filter(|key| !key.trim().is_empty())
    }

    /// Get the API key or fail; the application cannot start without one.
    pub fn require_api_key(&self) -> Result<String> {
        self.get_api_key().ok_or_else(|| {
            TapwordError::Config(format!(
                "{} environment variable not set",
                self.provider.api_key_env
            ))
        })
    }

    /// Reject values the prompts and sampler cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.prediction.context_words == 0 {
            return Err(TapwordError::Config(
                "prediction.context_words must be at least 1".to_string(),
            ));
        }
        if self.prediction.max_suggestions == 0 {
            return Err(TapwordError::Config(
                "prediction.max_suggestions must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("prediction.temperature", self.prediction.temperature),
            ("correction.temperature", self.correction.temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                return Err(TapwordError::Config(format!(
                    "{name} must be between 0.0 and 2.0, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.prediction.top_p) {
            return Err(TapwordError::Config(format!(
                "prediction.top_p must be between 0.0 and 1.0, got {}",
                self.prediction.top_p
            )));
        }
        if self.provider.model.trim().is_empty() {
            return Err(TapwordError::Config("provider.model is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_context_words_rejected() {
        let mut settings = Settings::default();
        settings.prediction.context_words = 0;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("context_words"));
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let mut settings = Settings::default();
        settings.correction.temperature = 3.5;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("correction.temperature"));
    }

    #[test]
    fn test_top_p_out_of_range_rejected() {
        let mut settings = Settings::default();
        settings.prediction.top_p = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_blank_model_rejected() {
        let mut settings = Settings::default();
        settings.provider.model = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
