// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Input handling for the TUI
//!
//! Maps terminal key presses onto keyboard and suggestion actions.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::{App, AppResult, Focus};
use crate::error::Result;
use crate::keyboard::{Direction, Key};

/// Poll for one terminal event and handle it
pub fn handle_input(app: &mut App, timeout: Duration) -> Result<AppResult> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(handle_key_event(app, key));
        }
    }

    Ok(AppResult::Continue)
}

/// Handle a single key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> AppResult {
    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return AppResult::Continue;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return AppResult::Quit;
    }
    if key.code == KeyCode::Esc {
        return AppResult::Quit;
    }

    // Alt+1..9 picks a suggestion directly
    if key.modifiers.contains(KeyModifiers::ALT) {
        if let KeyCode::Char(c) = key.code {
            if let Some(n) = c.to_digit(10).filter(|n| *n > 0) {
                app.select_suggestion(n as usize - 1);
            }
        }
        return AppResult::Continue;
    }

    match app.focus {
        Focus::Keyboard => handle_keyboard_input(app, key.code),
        Focus::Suggestions => handle_suggestion_input(app, key.code),
    }

    AppResult::Continue
}

fn handle_keyboard_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Tab => {
            app.focus_suggestions();
        }

        // Virtual keyboard navigation
        KeyCode::Up => app.move_cursor(Direction::Up),
        KeyCode::Down => app.move_cursor(Direction::Down),
        KeyCode::Left => app.move_cursor(Direction::Left),
        KeyCode::Right => app.move_cursor(Direction::Right),
        KeyCode::Enter => app.press_highlighted(),

        // Direct typing
        KeyCode::Backspace => app.press_key(Key::Backspace),
        KeyCode::Char(' ') => app.press_key(Key::Space),
        KeyCode::Char(c) => app.press_key(Key::Char(c)),

        _ => {}
    }
}

fn handle_suggestion_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.previous_suggestion(),
        KeyCode::Right => app.next_suggestion(),
        KeyCode::Enter => {
            app.select_highlighted_suggestion();
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.focus_keyboard(),

        // Typing goes straight back to the document
        KeyCode::Backspace => app.press_key(Key::Backspace),
        KeyCode::Char(' ') => app.press_key(Key::Space),
        KeyCode::Char(c) => app.press_key(Key::Char(c)),

        _ => {}
    }
}
