// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Editing surface
//!
//! The document is a single string that only ever grows at its end or
//! shrinks by backspace. Suggestion and correction merges are pure
//! functions of the current text so they can be checked in isolation.

/// The word-boundary character
pub const SEPARATOR: char = ' ';

/// The text being typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    /// Create a document holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Check if the document is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Append the lowercase form of `c`
    pub fn append_character(&mut self, c: char) {
        self.text.extend(c.to_lowercase());
    }

    /// Remove the last character. Returns false when there was nothing to remove.
    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Append a single separator
    pub fn append_separator(&mut self) {
        self.text.push(SEPARATOR);
    }

    /// Whether the text ends on a word boundary
    pub fn ends_with_separator(&self) -> bool {
        self.text.ends_with(SEPARATOR)
    }

    /// The word being typed, empty right after a separator
    pub fn partial_word(&self) -> &str {
        partial_word(&self.text)
    }
}

/// Trailing word fragment of `text`; empty if `text` ends in whitespace.
pub fn partial_word(text: &str) -> &str {
    text.rsplit(char::is_whitespace).next().unwrap_or("")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Merge a chosen suggestion into `text`.
///
/// When `suggestion` extends the partially typed `last_word` (ignoring case)
/// the fragment is replaced; otherwise the suggestion becomes a new word
/// after the trimmed text. The result always ends with a separator.
///
/// An unrelated suggestion is joined with a separator rather than glued
/// onto the fragment, so `"The qu"` + `"brown"` gives `"The qu brown "`.
pub fn replace_suggestion(text: &str, last_word: &str, suggestion: &str) -> String {
    let trimmed = text.trim_end();

    let completes_fragment = !last_word.is_empty()
        && trimmed.ends_with(last_word)
        && suggestion
            .to_lowercase()
            .starts_with(&last_word.to_lowercase());

    if completes_fragment {
        let head = &trimmed[..trimmed.len() - last_word.len()];
        return format!("{head}{suggestion}{SEPARATOR}");
    }

    if trimmed.is_empty() {
        format!("{suggestion}{SEPARATOR}")
    } else {
        format!("{trimmed}{SEPARATOR}{suggestion}{SEPARATOR}")
    }
}

/// Whether `current` still ends with the whole word `original` followed by
/// exactly one separator.
pub fn correction_applies(current: &str, original: &str) -> bool {
    if original.is_empty() {
        return false;
    }
    let Some(body) = current.strip_suffix(SEPARATOR) else {
        return false;
    };
    let Some(head) = body.strip_suffix(original) else {
        return false;
    };
    !head.chars().next_back().is_some_and(is_word_char)
}

/// Replace the trailing `original` word with `corrected`, or return
/// `current` unchanged when the guard in [`correction_applies`] fails.
pub fn apply_correction(current: &str, original: &str, corrected: &str) -> String {
    if !correction_applies(current, original) {
        return current.to_string();
    }
    let head = &current[..current.len() - original.len() - SEPARATOR.len_utf8()];
    format!("{head}{corrected}{SEPARATOR}")
}
