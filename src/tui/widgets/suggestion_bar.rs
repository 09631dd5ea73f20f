// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Suggestion row widget

use ratatui::prelude::*;

use super::label_width;

/// Shown when there is nothing to suggest
pub const PLACEHOLDER: &str = "Type a word and a space to see suggestions...";

/// Shown while a request is in flight
pub const LOADING: &str = "Finding suggestions...";

/// Widget for rendering the suggestion chips
pub struct SuggestionBar<'a> {
    suggestions: &'a [String],
    selected: Option<usize>,
    is_loading: bool,
}

impl<'a> SuggestionBar<'a> {
    pub fn new(suggestions: &'a [String]) -> Self {
        Self {
            suggestions,
            selected: None,
            is_loading: false,
        }
    }

    /// Highlight the chip at `index`
    pub fn selected(mut self, index: Option<usize>) -> Self {
        self.selected = index;
        self
    }

    pub fn loading(mut self, is_loading: bool) -> Self {
        self.is_loading = is_loading;
        self
    }
}

impl<'a> Widget for SuggestionBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }
        let right = area.x + area.width;

        if self.suggestions.is_empty() {
            let (text, style) = if self.is_loading {
                (LOADING, Style::default().fg(Color::Green).italic())
            } else {
                (PLACEHOLDER, Style::default().fg(Color::DarkGray).italic())
            };
            buf.set_string(area.x + 1, area.y, text, style);
            return;
        }

        let hint_style = Style::default().fg(Color::DarkGray);
        let chip_style = Style::default().fg(Color::White).bg(Color::Blue);
        let selected_style = Style::default().fg(Color::Black).bg(Color::Cyan).bold();
        let dimmed_style = Style::default().fg(Color::Gray).bg(Color::DarkGray);

        let mut x = area.x + 1;
        for (idx, word) in self.suggestions.iter().enumerate() {
            let hint = format!("{}", idx + 1);
            let chip = format!(" {word} ");
            let width = label_width(&hint) + label_width(&chip) + 2;
            if x + width > right {
                break;
            }

            buf.set_string(x, area.y, &hint, hint_style);
            x += label_width(&hint);

            // Chips from the previous request are dimmed until the new ones land
            let style = if self.is_loading {
                dimmed_style
            } else if self.selected == Some(idx) {
                selected_style
            } else {
                chip_style
            };
            buf.set_string(x, area.y, &chip, style);
            x += label_width(&chip) + 2;
        }
    }
}
