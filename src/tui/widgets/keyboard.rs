// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! On-screen keyboard widget

use ratatui::prelude::*;

use super::label_width;
use crate::keyboard::{Key, KeyPosition, Layout};

/// Width of the space bar cap
const SPACE_BAR_WIDTH: u16 = 29;

/// Widget for rendering the virtual keyboard
pub struct KeyboardWidget<'a> {
    layout: &'a Layout,
    highlighted: Option<KeyPosition>,
}

impl<'a> KeyboardWidget<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self {
            layout,
            highlighted: None,
        }
    }

    pub fn highlighted(mut self, position: Option<KeyPosition>) -> Self {
        self.highlighted = position;
        self
    }
}

/// Text drawn for a key, padded to its cap width
fn cap_text(key: Key) -> String {
    match key {
        Key::Space => {
            let label = key.label();
            let width = SPACE_BAR_WIDTH as usize;
            format!("{label:^width$}")
        }
        _ => format!(" {} ", key.label()),
    }
}

fn row_width(caps: &[String]) -> u16 {
    let keys: u16 = caps.iter().map(|c| label_width(c)).sum();
    keys + caps.len().saturating_sub(1) as u16
}

impl<'a> Widget for KeyboardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.layout.rows();
        if area.height == 0 || area.width == 0 || rows.is_empty() {
            return;
        }

        // Leave a blank line between rows when there is room
        let row_step = if area.height as usize >= rows.len() * 2 - 1 {
            2
        } else {
            1
        };

        let right = area.x + area.width;
        let key_style = Style::default().fg(Color::White).bg(Color::DarkGray);
        let special_style = Style::default().fg(Color::Yellow).bg(Color::DarkGray);
        let highlight_style = Style::default().fg(Color::Black).bg(Color::Cyan).bold();

        for (row_idx, keys) in rows.iter().enumerate() {
            let y = area.y + (row_idx * row_step) as u16;
            if y >= area.y + area.height {
                break;
            }

            let caps: Vec<String> = keys.iter().map(|k| cap_text(*k)).collect();
            let width = row_width(&caps);
            let mut x = area.x + area.width.saturating_sub(width) / 2;

            for (col_idx, (key, cap)) in keys.iter().zip(&caps).enumerate() {
                if x >= right {
                    break;
                }
                let style = if self.highlighted == Some((row_idx, col_idx)) {
                    highlight_style
                } else if key.is_special() {
                    special_style
                } else {
                    key_style
                };
                buf.set_string(x, y, cap, style);
                x = x.saturating_add(label_width(cap) + 1);
            }
        }
    }
}
