// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Suggestion reconciler
//!
//! Owns the document and the suggestion list and is the only place either
//! is mutated. Two independent background flows feed it:
//!
//! - the debounced suggestion fetch: every text change bumps a generation
//!   counter and re-arms a single-slot timer; when the timer for the current
//!   generation fires on a word boundary a fetch is started, and its answer
//!   is honoured only if no newer text change happened in the meantime;
//! - the background correction: started immediately on every separator,
//!   never cancelled, and merged only while the corrected word is still the
//!   last word of the text.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::document::{apply_correction, replace_suggestion, Document};
use super::events::{create_event_channel, send_event, EventReceiver, EventSender, KeyboardEvent};
use super::layout::{EditAction, Key};
use crate::config::Settings;
use crate::predict::QueryClient;

/// Where the suggestion flow currently is
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SuggestionState {
    /// Nothing scheduled, nothing in flight
    #[default]
    Idle,
    /// Waiting for input to pause
    Debouncing,
    /// Suggestion request in flight
    Fetching,
    /// Latest request succeeded
    Settled(Vec<String>),
    /// Latest request failed; the message is user-facing
    Error(String),
}

/// Tunables for the reconciler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilerConfig {
    /// Quiet period before fetching suggestions
    pub debounce: Duration,
    /// Correct the completed word on every separator
    pub autocorrect: bool,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl ReconcilerConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            debounce: Duration::from_millis(settings.keyboard.debounce_ms),
            autocorrect: settings.correction.enabled,
        }
    }
}

/// Keeps the document, suggestions and background requests consistent
pub struct Reconciler {
    client: QueryClient,
    config: ReconcilerConfig,
    document: Document,
    suggestions: Vec<String>,
    state: SuggestionState,
    /// Bumped on every text change
    generation: u64,
    debounce_timer: Option<JoinHandle<()>>,
    pending_corrections: usize,
    events_tx: EventSender,
    events_rx: EventReceiver,
}

impl Reconciler {
    /// Create a reconciler over `initial_text`. Nothing is scheduled until
    /// [`Reconciler::start`] or the first edit.
    pub fn new(client: QueryClient, config: ReconcilerConfig, initial_text: &str) -> Self {
        let (events_tx, events_rx) = create_event_channel();
        Self {
            client,
            config,
            document: Document::new(initial_text),
            suggestions: Vec::new(),
            state: SuggestionState::Idle,
            generation: 0,
            debounce_timer: None,
            pending_corrections: 0,
            events_tx,
            events_rx,
        }
    }

    /// Treat the initial text as freshly typed so it gets suggestions.
    pub fn start(&mut self) {
        if !self.document.is_empty() {
            self.text_changed();
        }
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn state(&self) -> &SuggestionState {
        &self.state
    }

    /// User-facing error from the last suggestion request, if it failed
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SuggestionState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state == SuggestionState::Fetching
    }

    /// Corrections dispatched but not yet resolved
    pub fn pending_corrections(&self) -> usize {
        self.pending_corrections
    }

    /// No timer armed, no current fetch and no correction outstanding
    pub fn is_quiescent(&self) -> bool {
        !matches!(
            self.state,
            SuggestionState::Debouncing | SuggestionState::Fetching
        ) && self.pending_corrections == 0
    }

    /// Apply a key press from the input surface
    pub fn press(&mut self, key: Key) {
        match key.action() {
            EditAction::Append(c) => {
                self.document.append_character(c);
                self.text_changed();
            }
            EditAction::Backspace => {
                if self.document.backspace() {
                    self.text_changed();
                }
            }
            EditAction::Separator => {
                let completed = self.document.partial_word().to_string();
                self.document.append_separator();
                self.text_changed();
                if self.config.autocorrect && !completed.is_empty() {
                    self.spawn_correction(completed);
                }
            }
        }
    }

    /// Merge the suggestion at `index` into the text.
    ///
    /// Returns false if there is no such suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return false;
        };

        let merged = replace_suggestion(
            self.document.text(),
            self.document.partial_word(),
            &suggestion,
        );
        tracing::debug!(target: "tapword.reconcile", %suggestion, "suggestion selected");

        self.document.set_text(merged);
        self.suggestions.clear();
        self.text_changed();
        true
    }

    /// Wait for the next background result
    pub async fn next_event(&mut self) -> Option<KeyboardEvent> {
        self.events_rx.recv().await
    }

    /// Take a background result if one is ready
    pub fn try_next_event(&mut self) -> Option<KeyboardEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Apply every result that is ready. Returns how many were handled.
    pub fn drain_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.try_next_event() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Apply one background result
    pub fn handle_event(&mut self, event: KeyboardEvent) {
        match event {
            KeyboardEvent::DebounceElapsed { generation } => self.debounce_elapsed(generation),
            KeyboardEvent::SuggestionsReady { generation, result } => {
                self.suggestions_ready(generation, result)
            }
            KeyboardEvent::CorrectionReady {
                original,
                corrected,
            } => self.correction_ready(&original, &corrected),
        }
    }

    fn text_changed(&mut self) {
        self.generation += 1;
        self.cancel_debounce();

        if !self.document.ends_with_separator() {
            self.suggestions.clear();
        }

        self.state = SuggestionState::Debouncing;
        self.arm_debounce();
    }

    fn cancel_debounce(&mut self) {
        if let Some(handle) = self.debounce_timer.take() {
            handle.abort();
        }
    }

    fn arm_debounce(&mut self) {
        let tx = self.events_tx.clone();
        let delay = self.config.debounce;
        let generation = self.generation;

        self.debounce_timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            send_event(&tx, KeyboardEvent::DebounceElapsed { generation });
        }));
    }

    fn debounce_elapsed(&mut self, generation: u64) {
        if generation != self.generation {
            return;
        }
        self.debounce_timer = None;

        let text = self.document.text();
        if !self.document.ends_with_separator() || text.trim().is_empty() {
            self.suggestions.clear();
            self.state = SuggestionState::Idle;
            return;
        }

        self.state = SuggestionState::Fetching;

        let client = self.client.clone();
        let tx = self.events_tx.clone();
        let text = text.to_string();
        tracing::debug!(target: "tapword.reconcile", generation, "fetching suggestions");

        tokio::spawn(async move {
            let result = client
                .request_next_words(&text)
                .await
                .map_err(|e| e.user_message());
            send_event(&tx, KeyboardEvent::SuggestionsReady { generation, result });
        });
    }

    fn suggestions_ready(
        &mut self,
        generation: u64,
        result: std::result::Result<Vec<String>, String>,
    ) {
        if generation != self.generation || self.state != SuggestionState::Fetching {
            tracing::debug!(
                target: "tapword.reconcile",
                generation,
                current = self.generation,
                "discarding stale suggestions"
            );
            return;
        }

        match result {
            Ok(words) => {
                self.suggestions = words.clone();
                self.state = SuggestionState::Settled(words);
            }
            Err(message) => {
                self.suggestions.clear();
                self.state = SuggestionState::Error(message);
            }
        }
    }

    fn spawn_correction(&mut self, word: String) {
        self.pending_corrections += 1;
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let corrected = client.request_correction(&word).await;
            send_event(
                &tx,
                KeyboardEvent::CorrectionReady {
                    original: word,
                    corrected,
                },
            );
        });
    }

    fn correction_ready(&mut self, original: &str, corrected: &str) {
        self.pending_corrections = self.pending_corrections.saturating_sub(1);

        if corrected.is_empty() || corrected.to_lowercase() == original.to_lowercase() {
            return;
        }

        let merged = apply_correction(self.document.text(), original, corrected);
        if merged == self.document.text() {
            tracing::debug!(target: "tapword.reconcile", original, corrected, "correction no longer applies");
            return;
        }

        tracing::info!(target: "tapword.reconcile", original, corrected, "applied correction");
        self.document.set_text(merged);
        self.text_changed();
    }
}

impl Drop for Reconciler {
    fn drop(&mut self) {
        self.cancel_debounce();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock_provider::{MockProvider, MockResponse};
    use std::sync::Arc;

    fn reconciler(provider: &MockProvider, text: &str) -> Reconciler {
        let client = QueryClient::new(Arc::new(provider.clone()));
        let config = ReconcilerConfig {
            debounce: Duration::from_millis(200),
            autocorrect: true,
        };
        Reconciler::new(client, config, text)
    }

    async fn settle(reconciler: &mut Reconciler) {
        while !reconciler.is_quiescent() {
            let event = reconciler.next_event().await.expect("channel open");
            reconciler.handle_event(event);
        }
    }

    fn type_str(reconciler: &mut Reconciler, text: &str) {
        for c in text.chars() {
            let key = if c == ' ' { Key::Space } else { Key::Char(c) };
            reconciler.press(key);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_letters_never_fetch() {
        let provider = MockProvider::new().with_predictions(&["x"]);
        let mut r = reconciler(&provider, "");

        type_str(&mut r, "hello");
        assert_eq!(r.state(), &SuggestionState::Debouncing);
        settle(&mut r).await;

        assert_eq!(r.text(), "hello");
        assert_eq!(r.state(), &SuggestionState::Idle);
        assert!(r.suggestions().is_empty());
        assert_eq!(provider.prediction_calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separator_fetches_after_debounce() {
        let provider = MockProvider::new().with_predictions(&["jumps", "runs"]);
        let mut r = reconciler(&provider, "the fox");

        r.press(Key::Space);
        assert_eq!(r.text(), "the fox ");
        settle(&mut r).await;

        assert_eq!(r.suggestions(), ["jumps", "runs"]);
        assert_eq!(
            r.state(),
            &SuggestionState::Settled(vec!["jumps".to_string(), "runs".to_string()])
        );
        assert_eq!(provider.prediction_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_fetches_for_initial_text() {
        let provider = MockProvider::new().with_predictions(&["jumps"]);
        let mut r = reconciler(&provider, "The quick brown fox ");

        r.start();
        settle(&mut r).await;

        assert_eq!(r.suggestions(), ["jumps"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_changes_fetch_once_for_final_text() {
        let provider = MockProvider::new().with_predictions(&["over"]);
        let mut r = reconciler(&provider, "");
        r.config.autocorrect = false;

        type_str(&mut r, "the fox jumps ");
        settle(&mut r).await;

        assert_eq!(provider.prediction_calls(), 1);
        let request = provider.last_request().unwrap();
        assert!(request.prompt.contains("Text: \"the fox jumps\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_clears_suggestions_immediately() {
        let provider = MockProvider::new().with_predictions(&["jumps"]);
        let mut r = reconciler(&provider, "fox ");
        r.start();
        settle(&mut r).await;
        assert!(!r.suggestions().is_empty());

        r.press(Key::Char('j'));
        assert!(r.suggestions().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_error_sets_error_and_clears() {
        let provider = MockProvider::new()
            .with_prediction_responses(vec![MockResponse::text("{\"not\": \"a list\"}")]);
        let mut r = reconciler(&provider, "fox ");

        r.start();
        settle(&mut r).await;

        assert!(r.suggestions().is_empty());
        let message = r.error().expect("error state");
        assert!(message.starts_with("Failed to get suggestions"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_fetch_result_discarded() {
        let provider = MockProvider::new().with_prediction_responses(vec![
            MockResponse::text("[\"slow\"]").after(Duration::from_secs(5)),
            MockResponse::text("[\"fast\"]"),
        ]);
        let mut r = reconciler(&provider, "");
        r.config.autocorrect = false;

        type_str(&mut r, "a ");
        // let the first fetch start
        tokio::time::sleep(Duration::from_millis(250)).await;
        r.drain_events();
        assert!(r.is_loading());

        type_str(&mut r, "b ");
        settle(&mut r).await;
        assert_eq!(r.suggestions(), ["fast"]);

        // the slow answer lands afterwards and must be ignored
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(r.drain_events(), 1);
        assert_eq!(r.suggestions(), ["fast"]);
        assert_eq!(provider.prediction_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_correction_applied_when_word_is_last() {
        let provider = MockProvider::new().with_correction("the");
        let mut r = reconciler(&provider, "");

        type_str(&mut r, "teh ");
        settle(&mut r).await;

        assert_eq!(r.text(), "the ");
        assert_eq!(provider.correction_calls(), 1);
        // suggestions are fetched for the corrected text only
        assert_eq!(provider.prediction_calls(), 1);
        let prediction = provider
            .recorded_requests()
            .into_iter()
            .find(|req| matches!(req.schema, crate::llm::ResponseSchema::StringArray { .. }))
            .unwrap();
        assert!(prediction.prompt.contains("Text: \"the\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_correction_not_applied() {
        let provider = MockProvider::new().with_correction_responses(vec![MockResponse::text(
            r#"{"correctedWord": "box"}"#,
        )
        .after(Duration::from_secs(1))]);
        let mut r = reconciler(&provider, "the ");

        type_str(&mut r, "fox j");
        settle(&mut r).await;

        assert_eq!(r.text(), "the fox j");
        assert_eq!(r.pending_corrections(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_correction_failure_is_silent() {
        let provider =
            MockProvider::new().with_correction_responses(vec![MockResponse::failure()]);
        let mut r = reconciler(&provider, "");

        type_str(&mut r, "teh ");
        settle(&mut r).await;

        assert_eq!(r.text(), "teh ");
        assert!(r.error().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_word_correction_ignored() {
        let provider = MockProvider::new().with_correction("Fox");
        let mut r = reconciler(&provider, "");

        type_str(&mut r, "fox ");
        settle(&mut r).await;

        assert_eq!(r.text(), "fox ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_space_does_not_correct() {
        let provider = MockProvider::new().with_correction("x");
        let mut r = reconciler(&provider, "fox ");

        r.press(Key::Space);
        settle(&mut r).await;

        assert_eq!(provider.correction_calls(), 0);
        assert_eq!(r.text(), "fox  ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_autocorrect_disabled() {
        let provider = MockProvider::new().with_correction("the");
        let mut r = reconciler(&provider, "");
        r.config.autocorrect = false;

        type_str(&mut r, "teh ");
        settle(&mut r).await;

        assert_eq!(provider.correction_calls(), 0);
        assert_eq!(r.text(), "teh ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_suggestion() {
        let provider = MockProvider::new().with_predictions(&["quick", "quiet"]);
        let mut r = reconciler(&provider, "the ");
        r.start();
        settle(&mut r).await;

        type_str(&mut r, "qu");
        // typing cleared the list; restore a settled list for the fragment
        r.suggestions = vec!["quick".to_string()];
        assert!(r.select_suggestion(0));

        assert_eq!(r.text(), "the quick ");
        assert!(r.suggestions().is_empty());
        assert_eq!(r.state(), &SuggestionState::Debouncing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_missing_suggestion() {
        let provider = MockProvider::new();
        let mut r = reconciler(&provider, "the ");
        assert!(!r.select_suggestion(3));
        assert_eq!(r.text(), "the ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backspace_on_empty_is_noop() {
        let provider = MockProvider::new();
        let mut r = reconciler(&provider, "");

        r.press(Key::Backspace);
        assert_eq!(r.state(), &SuggestionState::Idle);
        assert!(r.is_quiescent());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_text_does_not_fetch() {
        let provider = MockProvider::new().with_predictions(&["x"]);
        let mut r = reconciler(&provider, "");

        r.press(Key::Space);
        settle(&mut r).await;

        assert_eq!(r.text(), " ");
        assert_eq!(r.state(), &SuggestionState::Idle);
        assert_eq!(provider.prediction_calls(), 0);
    }
}
