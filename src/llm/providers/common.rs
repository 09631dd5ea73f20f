// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

use reqwest::header::{HeaderMap, RETRY_AFTER};

use crate::error::{ApiError, TapwordError};

/// Parse numeric Retry-After header (seconds).
pub(crate) fn parse_retry_after_seconds(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse::<u64>().ok())
}

/// Construct a standardized server error.
pub(crate) fn server_error(status: u16, message: impl Into<String>) -> TapwordError {
    TapwordError::Api(ApiError::ServerError {
        status,
        message: message.into(),
    })
}

/// Map a reqwest transport failure onto the API error taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> TapwordError {
    if err.is_timeout() {
        TapwordError::Api(ApiError::Timeout)
    } else if err.is_connect() || err.is_request() {
        TapwordError::Api(ApiError::Network(err.to_string()))
    } else {
        TapwordError::Http(err)
    }
}
