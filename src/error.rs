// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Error types for tapword
//!
//! This module defines all error types used throughout the application.

use thiserror::Error;

/// Main error type for tapword operations
#[derive(Error, Debug)]
pub enum TapwordError {
    /// Language model service errors
    #[error("Service error: {0}")]
    Api(#[from] ApiError),

    /// Configuration errors (missing credentials, bad settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Terminal UI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

/// Errors reported by the remote language model service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Authentication failed (invalid API key)
    #[error("Authentication failed: invalid API key")]
    AuthenticationFailed,

    /// Rate limited by the API
    #[error("Rate limited: retry after {0} seconds")]
    RateLimited(u32),

    /// Requested model not found
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Network connectivity error
    #[error("Network error: {0}")]
    Network(String),

    /// Response did not have the expected shape
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// API returned an error
    #[error("API error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Timeout waiting for response
    #[error("Request timed out")]
    Timeout,

    /// Prompt or answer was blocked by the service
    #[error("Request blocked: {0}")]
    Blocked(String),
}

impl ApiError {
    /// Short text suitable for the on-screen error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::AuthenticationFailed => {
                "Failed to get suggestions: the API key was rejected".to_string()
            }
            ApiError::RateLimited(secs) => {
                format!("Failed to get suggestions: rate limited, retry in {secs}s")
            }
            other => format!("Failed to get suggestions: {other}"),
        }
    }
}

impl TapwordError {
    /// Message shown to the user when a suggestion request fails.
    pub fn user_message(&self) -> String {
        match self {
            TapwordError::Api(api) => api.user_message(),
            TapwordError::Http(err) if err.is_timeout() => ApiError::Timeout.user_message(),
            TapwordError::Http(err) if err.is_connect() => {
                ApiError::Network(err.to_string()).user_message()
            }
            other => format!("Failed to get suggestions: {other}"),
        }
    }
}

/// Result type alias for tapword operations
pub type Result<T> = std::result::Result<T, TapwordError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = TapwordError::Config("API_KEY environment variable not set".to_string());
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn test_tui_error_display() {
        let err = TapwordError::Tui("terminal gone".to_string());
        assert!(err.to_string().contains("TUI error"));
    }

    #[test]
    fn test_from_api_error() {
        let err: TapwordError = ApiError::AuthenticationFailed.into();
        assert!(err.to_string().starts_with("Service error"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: TapwordError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_rate_limited_user_message() {
        let msg = ApiError::RateLimited(12).user_message();
        assert!(msg.contains("rate limited"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn test_invalid_response_user_message() {
        let err: TapwordError = ApiError::InvalidResponse("expected array".to_string()).into();
        let msg = err.user_message();
        assert!(msg.starts_with("Failed to get suggestions"));
        assert!(msg.contains("expected array"));
    }

    #[test]
    fn test_server_error_display() {
        let err = ApiError::ServerError {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("overloaded"));
    }

    #[test]
    fn test_blocked_display() {
        let err = ApiError::Blocked("SAFETY".to_string());
        assert!(err.to_string().contains("blocked"));
    }
}
