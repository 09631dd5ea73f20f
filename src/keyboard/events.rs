// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Event system for the keyboard
//!
//! Background tasks (debounce timers, suggestion fetches, corrections) never
//! touch the document. They report back through an unbounded tokio channel
//! and the owning loop applies the result.

use tokio::sync::mpsc;

/// Results posted back by background tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardEvent {
    /// The quiet period scheduled for text generation `generation` elapsed
    DebounceElapsed { generation: u64 },

    /// A suggestion fetch for text generation `generation` finished
    SuggestionsReady {
        generation: u64,
        result: std::result::Result<Vec<String>, String>,
    },

    /// A background correction finished
    CorrectionReady { original: String, corrected: String },
}

/// Type alias for the event sender
pub type EventSender = mpsc::UnboundedSender<KeyboardEvent>;

/// Type alias for the event receiver
pub type EventReceiver = mpsc::UnboundedReceiver<KeyboardEvent>;

/// Create a new event channel
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Helper for sending events, ignoring errors if receiver is dropped
pub fn send_event(tx: &EventSender, event: KeyboardEvent) {
    let _ = tx.send(event);
}
