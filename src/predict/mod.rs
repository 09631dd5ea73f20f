// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Next-word prediction and single-word correction queries

pub mod client;
pub mod prompts;

pub use client::{parse_correction, parse_word_list, QueryClient};
