// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! CLI argument definitions using Clap

use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

/// tapword - a predictive keyboard for your terminal
#[derive(Parser, Debug)]
#[command(name = "tapword")]
#[command(version, about = "Predictive keyboard with next-word suggestions and auto-correction")]
pub struct Cli {
    /// Settings file path (defaults to ~/.tapword/settings.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Model used for prediction and correction
    #[arg(short, long)]
    pub model: Option<String>,

    /// Quiet period in milliseconds before suggestions are fetched
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Do not correct the previous word when a space is typed
    #[arg(long)]
    pub no_autocorrect: bool,

    /// Text the editor starts with
    #[arg(long)]
    pub text: Option<String>,
}

impl Cli {
    /// Apply command-line overrides on top of loaded settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(model) = &self.model {
            settings.provider.model = model.clone();
        }
        if let Some(debounce_ms) = self.debounce_ms {
            settings.keyboard.debounce_ms = debounce_ms;
        }
        if self.no_autocorrect {
            settings.correction.enabled = false;
        }
        if let Some(text) = &self.text {
            settings.keyboard.initial_text = text.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["tapword"]);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.model.is_none());
        assert!(!cli.no_autocorrect);
    }

    #[test]
    fn test_cli_verbose_multiple() {
        let cli = Cli::parse_from(["tapword", "-vv"]);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_all_flags() {
        let cli = Cli::parse_from([
            "tapword",
            "--config",
            "/tmp/s.json",
            "--model",
            "gemini-2.0-flash",
            "--debounce-ms",
            "350",
            "--no-autocorrect",
            "--text",
            "hello ",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/s.json")));
        assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(cli.debounce_ms, Some(350));
        assert!(cli.no_autocorrect);
        assert_eq!(cli.text.as_deref(), Some("hello "));
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::parse_from(["tapword", "-m", "m2", "--debounce-ms", "10", "--no-autocorrect"]);
        let mut settings = Settings::default();
        cli.apply_to(&mut settings);

        assert_eq!(settings.provider.model, "m2");
        assert_eq!(settings.keyboard.debounce_ms, 10);
        assert!(!settings.correction.enabled);
        assert_eq!(settings.keyboard.initial_text, "The quick brown fox ");
    }

    #[test]
    fn test_apply_without_overrides_keeps_settings() {
        let cli = Cli::parse_from(["tapword"]);
        let mut settings = Settings::default();
        settings.provider.model = "custom".to_string();
        cli.apply_to(&mut settings);

        assert_eq!(settings.provider.model, "custom");
        assert!(settings.correction.enabled);
    }
}
