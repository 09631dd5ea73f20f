// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Mock LLM provider for testing
//!
//! Provides a configurable mock implementation of the LlmProvider trait
//! that can be used in tests without making real API calls. Prediction
//! (array-schema) and correction (object-schema) requests are scripted
//! separately so both flows can be driven independently.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::error::{ApiError, Result, TapwordError};
use crate::llm::provider::{GenerateRequest, LlmProvider, ResponseSchema};

/// A mock LLM provider for testing
#[derive(Clone)]
pub struct MockProvider {
    /// Provider name
    name: String,
    /// Responses to array-schema requests
    prediction_responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Responses to object-schema requests
    correction_responses: Arc<Mutex<Vec<MockResponse>>>,
    /// Array-schema call counter
    prediction_calls: Arc<AtomicUsize>,
    /// Object-schema call counter
    correction_calls: Arc<AtomicUsize>,
    /// Recorded requests
    recorded_requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

/// A pre-configured response for the mock provider
#[derive(Clone, Debug)]
pub struct MockResponse {
    /// Raw text returned, or `None` to fail with a server error
    pub body: Option<String>,
    /// Simulated latency before answering
    pub delay: Duration,
}

impl MockResponse {
    /// Successful answer with the given raw text
    pub fn text(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            delay: Duration::ZERO,
        }
    }

    /// Transport-level failure
    pub fn failure() -> Self {
        Self {
            body: None,
            delay: Duration::ZERO,
        }
    }

    /// Delay the answer
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("Mock provider lock was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

impl MockProvider {
    /// Create a new mock provider answering `[]` and `{"correctedWord": ""}`
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            prediction_responses: Arc::new(Mutex::new(vec![MockResponse::text("[]")])),
            correction_responses: Arc::new(Mutex::new(vec![MockResponse::text(
                r#"{"correctedWord": ""}"#,
            )])),
            prediction_calls: Arc::new(AtomicUsize::new(0)),
            correction_calls: Arc::new(AtomicUsize::new(0)),
            recorded_requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Answer every prediction request with these words
    pub fn with_predictions(self, words: &[&str]) -> Self {
        let body = serde_json::to_string(words).unwrap_or_else(|_| "[]".to_string());
        self.with_prediction_responses(vec![MockResponse::text(body)])
    }

    /// Queue prediction responses (returned in order, the last one repeats)
    pub fn with_prediction_responses(self, responses: Vec<MockResponse>) -> Self {
        *lock(&self.prediction_responses) = responses;
        self
    }

    /// Answer every correction request with this word
    pub fn with_correction(self, word: &str) -> Self {
        let body = serde_json::json!({ "correctedWord": word }).to_string();
        self.with_correction_responses(vec![MockResponse::text(body)])
    }

    /// Queue correction responses (returned in order, the last one repeats)
    pub fn with_correction_responses(self, responses: Vec<MockResponse>) -> Self {
        *lock(&self.correction_responses) = responses;
        self
    }

    /// Number of prediction requests received
    pub fn prediction_calls(&self) -> usize {
        self.prediction_calls.load(Ordering::SeqCst)
    }

    /// Number of correction requests received
    pub fn correction_calls(&self) -> usize {
        self.correction_calls.load(Ordering::SeqCst)
    }

    /// Total number of requests received
    pub fn call_count(&self) -> usize {
        self.prediction_calls() + self.correction_calls()
    }

    /// Get all recorded requests
    pub fn recorded_requests(&self) -> Vec<GenerateRequest> {
        lock(&self.recorded_requests).clone()
    }

    /// Get the last request made
    pub fn last_request(&self) -> Option<GenerateRequest> {
        lock(&self.recorded_requests).last().cloned()
    }

    fn next_response(&self, schema: &ResponseSchema) -> MockResponse {
        let (counter, responses) = match schema {
            ResponseSchema::StringArray { .. } => {
                (&self.prediction_calls, &self.prediction_responses)
            }
            ResponseSchema::Object { .. } => (&self.correction_calls, &self.correction_responses),
        };
        let count = counter.fetch_add(1, Ordering::SeqCst);
        let responses = lock(responses);
        if responses.is_empty() {
            MockResponse::failure()
        } else {
            responses[count.min(responses.len() - 1)].clone()
        }
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        lock(&self.recorded_requests).push(request.clone());

        let response = self.next_response(&request.schema);
        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }

        response.body.ok_or_else(|| {
            TapwordError::Api(ApiError::Network("mock transport failure".to_string()))
        })
    }
}
