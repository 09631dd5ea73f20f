// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Application state for the keyboard TUI

use crate::keyboard::{Direction, Key, KeyPosition, Layout, Reconciler};

/// Result of handling input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

/// Which part of the screen receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Typing and the virtual keyboard
    #[default]
    Keyboard,
    /// The suggestion row
    Suggestions,
}

/// Main application state
pub struct App {
    /// Document, suggestions and background requests
    pub reconciler: Reconciler,
    /// Virtual keyboard layout
    pub layout: Layout,
    /// Current focus
    pub focus: Focus,
    /// Highlighted virtual key
    pub key_cursor: KeyPosition,
    /// Highlighted suggestion while the row has focus
    pub suggestion_index: usize,
    /// Provider name shown in the header
    pub provider: String,
    /// Model name shown in the header
    pub model: String,
}

impl App {
    /// Create a new app
    pub fn new(reconciler: Reconciler, model: impl Into<String>) -> Self {
        Self {
            reconciler,
            layout: Layout::qwerty(),
            focus: Focus::Keyboard,
            key_cursor: (0, 0),
            suggestion_index: 0,
            provider: "gemini".to_string(),
            model: model.into(),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Press a key. Focus always returns to the keyboard.
    pub fn press_key(&mut self, key: Key) {
        self.focus = Focus::Keyboard;
        if let Some(position) = self.layout.position_of(key) {
            self.key_cursor = position;
        }
        self.reconciler.press(key);
    }

    /// Press the highlighted virtual key
    pub fn press_highlighted(&mut self) {
        if let Some(key) = self.layout.key_at(self.key_cursor) {
            self.press_key(key);
        }
    }

    /// Move the virtual key highlight
    pub fn move_cursor(&mut self, direction: Direction) {
        self.key_cursor = self.layout.step(self.key_cursor, direction);
    }

    /// Give the suggestion row focus if it has anything to pick
    pub fn focus_suggestions(&mut self) -> bool {
        if self.reconciler.suggestions().is_empty() {
            return false;
        }
        self.focus = Focus::Suggestions;
        self.suggestion_index = 0;
        true
    }

    /// Return focus to the keyboard
    pub fn focus_keyboard(&mut self) {
        self.focus = Focus::Keyboard;
    }

    pub fn next_suggestion(&mut self) {
        let count = self.reconciler.suggestions().len();
        if count > 0 {
            self.suggestion_index = (self.suggestion_index + 1).min(count - 1);
        }
    }

    pub fn previous_suggestion(&mut self) {
        self.suggestion_index = self.suggestion_index.saturating_sub(1);
    }

    /// Select the highlighted suggestion
    pub fn select_highlighted_suggestion(&mut self) -> bool {
        self.select_suggestion(self.suggestion_index)
    }

    /// Select the suggestion at `index`; focus returns to the keyboard
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let selected = self.reconciler.select_suggestion(index);
        self.focus = Focus::Keyboard;
        self.suggestion_index = 0;
        selected
    }

    /// Apply finished background work and keep focus consistent with it
    pub fn process_background(&mut self) -> usize {
        let handled = self.reconciler.drain_events();
        if handled > 0 {
            self.sync_focus();
        }
        handled
    }

    fn sync_focus(&mut self) {
        let count = self.reconciler.suggestions().len();
        if count == 0 {
            self.focus = Focus::Keyboard;
            self.suggestion_index = 0;
        } else if self.suggestion_index >= count {
            self.suggestion_index = count - 1;
        }
    }
}
