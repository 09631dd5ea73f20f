// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Keyboard core
//!
//! - `document`: the editing surface and the pure merge rules
//! - `layout`: virtual keys and what pressing them does
//! - `reconciler`: debounced suggestions and background corrections
//! - `events`: results posted back by background tasks

pub mod document;
pub mod events;
pub mod layout;
pub mod reconciler;

pub use document::{apply_correction, correction_applies, replace_suggestion, Document, SEPARATOR};
pub use events::KeyboardEvent;
pub use layout::{Direction, EditAction, Key, KeyPosition, Layout};
pub use reconciler::{Reconciler, ReconcilerConfig, SuggestionState};
