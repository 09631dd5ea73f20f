// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Prompt construction for prediction and correction requests

/// Description attached to each element of the prediction schema
pub const PREDICTED_WORD_DESCRIPTION: &str = "A predicted next word";

/// Name of the single field in the correction schema
pub const CORRECTED_WORD_FIELD: &str = "correctedWord";

/// Description attached to the correction field
pub const CORRECTED_WORD_DESCRIPTION: &str = "The corrected word";

/// Last `words` whitespace-separated tokens of `text`, joined by single spaces.
pub fn context_window(text: &str, words: usize) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let start = tokens.len().saturating_sub(words);
    tokens[start..].join(" ")
}

/// Prompt asking for the `count` most likely next words after `context`.
pub fn next_words_prompt(context: &str, count: usize) -> String {
    format!(
        "Given the following text, predict the {count} most likely words that could come next. \
         Respond with only a JSON array of these words. Do not include any other text, \
         explanation, or markdown formatting. Text: \"{context}\""
    )
}

/// Prompt asking for the spelling-corrected form of `word`.
pub fn correction_prompt(word: &str) -> String {
    format!(
        "Correct the spelling of the following word. If it is already correct, return the \
         original word. Respond with only a JSON object containing a single key \
         \"{CORRECTED_WORD_FIELD}\" with the corrected word as its value. Do not include any \
         other text or formatting. Word: \"{word}\""
    )
}
