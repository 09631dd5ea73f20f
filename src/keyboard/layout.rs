// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Virtual keyboard keys and layout
//!
//! Keys carry no state; pressing one maps to exactly one edit action.

/// A key on the virtual keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character
    Char(char),
    /// The word separator
    Space,
    /// Delete the last character
    Backspace,
}

/// Edit performed by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Append a (lowercased) character
    Append(char),
    /// Append a separator and correct the word it completes
    Separator,
    /// Delete the last character
    Backspace,
}

impl Key {
    /// Map the key to its edit
    pub fn action(self) -> EditAction {
        match self {
            Key::Backspace => EditAction::Backspace,
            Key::Space | Key::Char(' ') => EditAction::Separator,
            Key::Char(c) => EditAction::Append(c),
        }
    }

    /// Text drawn on the key cap
    pub fn label(self) -> String {
        match self {
            Key::Char(c) => c.to_uppercase().collect(),
            Key::Space => "space".to_string(),
            Key::Backspace => "⌫".to_string(),
        }
    }

    /// Whether the key is a wide special key
    pub fn is_special(self) -> bool {
        matches!(self, Key::Space | Key::Backspace)
    }
}

/// Direction of travel over the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Position of a key as (row, column)
pub type KeyPosition = (usize, usize);

/// Rows of keys, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<Key>>,
}

impl Default for Layout {
    fn default() -> Self {
        Self::qwerty()
    }
}

impl Layout {
    /// The standard QWERTY letter layout with backspace and space bar
    pub fn qwerty() -> Self {
        let letters = |row: &str| row.chars().map(Key::Char).collect::<Vec<_>>();

        let mut bottom = letters("zxcvbnm");
        bottom.push(Key::Backspace);

        Self {
            rows: vec![
                letters("qwertyuiop"),
                letters("asdfghjkl"),
                bottom,
                vec![Key::Space],
            ],
        }
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<Key>] {
        &self.rows
    }

    /// Key at `position`, if any
    pub fn key_at(&self, (row, col): KeyPosition) -> Option<Key> {
        self.rows.get(row).and_then(|keys| keys.get(col)).copied()
    }

    /// Position of `key`, if it is on the layout
    pub fn position_of(&self, key: Key) -> Option<KeyPosition> {
        self.rows.iter().enumerate().find_map(|(row, keys)| {
            keys.iter()
                .position(|k| *k == key)
                .map(|col| (row, col))
        })
    }

    /// Move one step from `position`, staying on the layout.
    ///
    /// Vertical moves keep the column where the target row is long enough
    /// and otherwise land on its last key.
    pub fn step(&self, (row, col): KeyPosition, direction: Direction) -> KeyPosition {
        if self.rows.is_empty() {
            return (0, 0);
        }
        let last_row = self.rows.len() - 1;
        let row = row.min(last_row);
        let row_len = |r: usize| self.rows[r].len().max(1);

        match direction {
            Direction::Left => (row, col.min(row_len(row) - 1).saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(row_len(row) - 1)),
            Direction::Up => {
                let target = row.saturating_sub(1);
                (target, col.min(row_len(target) - 1))
            }
            Direction::Down => {
                let target = (row + 1).min(last_row);
                (target, col.min(row_len(target) - 1))
            }
        }
    }
}
