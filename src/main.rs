// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! tapword - a predictive keyboard for your terminal
//!
//! Entry point for the tapword binary.

use std::fs::{self, OpenOptions};
use std::sync::{Arc, Mutex};

use clap::Parser;

use tapword::cli::Cli;
use tapword::config::Settings;
use tapword::error::Result;
use tapword::keyboard::{Reconciler, ReconcilerConfig};
use tapword::llm::providers::GeminiProvider;
use tapword::predict::QueryClient;
use tapword::tui::{self, App};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    // Load settings, then let flags override them
    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    cli.apply_to(&mut settings);
    settings.validate()?;

    // Without a key there is nothing to talk to
    let api_key = settings.require_api_key()?;

    let provider = match &settings.provider.base_url {
        Some(base_url) => {
            GeminiProvider::with_base_url(api_key, &settings.provider.model, base_url.as_str())
        }
        None => GeminiProvider::new(api_key, &settings.provider.model),
    };
    let model = provider.model().to_string();
    let client = QueryClient::from_settings(Arc::new(provider), &settings);
    tracing::info!(
        target: "tapword.startup",
        provider = client.provider_name(),
        %model,
        "starting keyboard"
    );

    let reconciler = Reconciler::new(
        client,
        ReconcilerConfig::from_settings(&settings),
        &settings.keyboard.initial_text,
    );
    let app = App::new(reconciler, model);

    tui::run_tui(app).await
}

/// Log to a file so output never lands on the alternate screen
fn init_tracing(verbose: u8) -> Result<()> {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::WARN.into());

    // `-v` turns on the keyboard's own diagnostics, `-vv` everything it logs.
    // `RUST_LOG` still takes precedence.
    let directives: &[&str] = match verbose {
        0 => &[],
        1 => &[
            "tapword.reconcile=debug",
            "tapword.predict=debug",
            "tapword.correct=debug",
        ],
        _ => &["tapword=trace"],
    };
    for directive in directives {
        if let Ok(parsed) = directive.parse() {
            env_filter = env_filter.add_directive(parsed);
        }
    }

    let log_path = Settings::log_path();
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
