// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! UI widgets for the keyboard TUI

pub mod keyboard;
pub mod status_bar;
pub mod suggestion_bar;

pub use keyboard::KeyboardWidget;
pub use status_bar::StatusBar;
pub use suggestion_bar::SuggestionBar;

/// Display width of a short label, counted in chars
pub(crate) fn label_width(text: &str) -> u16 {
    text.chars().count().min(u16::MAX as usize) as u16
}

/// Fill one line of `area` with `style`
pub(crate) fn fill_line(
    buf: &mut ratatui::buffer::Buffer,
    area: ratatui::layout::Rect,
    y: u16,
    style: ratatui::style::Style,
) {
    for x in area.x..area.x + area.width {
        buf.set_string(x, y, " ", style);
    }
}
