// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! tapword - a predictive keyboard for the terminal.
//!
//! Typing goes into a single growing text. Once input pauses after a word
//! boundary a generative model is asked for the likely next words, and
//! every completed word is quietly sent off for spelling correction.
//!
//! Architecture highlights:
//! - `keyboard`: the document, the virtual layout and the reconciler that
//!   keeps suggestions and corrections consistent with what was typed
//! - `predict`: prompt construction and parsing of structured replies
//! - `llm`: provider abstraction and the Gemini implementation
//! - `tui`: ratatui presentation and crossterm input
//! - `config`, `cli`, `error`: ambient plumbing

pub mod cli;
pub mod config;
pub mod error;
pub mod keyboard;
pub mod llm;
pub mod predict;
pub mod tui;

pub use error::{Result, TapwordError};
