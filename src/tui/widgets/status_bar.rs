// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Title bar widget

use ratatui::prelude::*;

use super::{fill_line, label_width};

/// Widget for rendering the title/status bar
pub struct StatusBar<'a> {
    title: &'a str,
    provider: &'a str,
    model: &'a str,
    is_fetching: bool,
    pending_corrections: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(title: &'a str, provider: &'a str, model: &'a str) -> Self {
        Self {
            title,
            provider,
            model,
            is_fetching: false,
            pending_corrections: 0,
        }
    }

    pub fn fetching(mut self, is_fetching: bool) -> Self {
        self.is_fetching = is_fetching;
        self
    }

    pub fn pending_corrections(mut self, count: usize) -> Self {
        self.pending_corrections = count;
        self
    }

    fn indicator(&self) -> Option<(String, Color)> {
        if self.is_fetching {
            Some(("● Fetching...".to_string(), Color::Green))
        } else if self.pending_corrections > 0 {
            Some((
                format!("✎ Correcting ({})", self.pending_corrections),
                Color::Yellow,
            ))
        } else {
            None
        }
    }
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 2 {
            return;
        }

        let bg_style = Style::default().bg(Color::DarkGray);
        fill_line(buf, area, area.y, bg_style);

        let right = area.x + area.width;
        let mut x = area.x + 1;

        let title_style = Style::default().fg(Color::White).bold().bg(Color::DarkGray);
        buf.set_string(x, area.y, self.title, title_style);
        x = x.saturating_add(label_width(self.title) + 1);

        if x + 2 < right {
            buf.set_string(
                x,
                area.y,
                "─",
                Style::default().fg(Color::Gray).bg(Color::DarkGray),
            );
            x += 2;
        }

        let info = format!("{} / {}", self.provider, self.model);
        if x < right {
            buf.set_string(
                x,
                area.y,
                &info,
                Style::default().fg(Color::Cyan).bg(Color::DarkGray),
            );
        }
        x = x.saturating_add(label_width(&info) + 2);

        // Right-aligned activity indicator
        if let Some((indicator, color)) = self.indicator() {
            let width = label_width(&indicator) + 1;
            if let Some(indicator_x) = right.checked_sub(width) {
                if indicator_x > x {
                    buf.set_string(
                        indicator_x,
                        area.y,
                        &indicator,
                        Style::default().fg(color).bg(Color::DarkGray),
                    );
                }
            }
        }
    }
}
