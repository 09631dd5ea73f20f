// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Terminal keyboard interface
//!
//! Uses ratatui for rendering and crossterm for input handling. Every pass
//! of the loop draws, polls the terminal briefly, then applies whatever the
//! background suggestion and correction tasks have finished.

pub mod app;
pub mod input;
pub mod ui;
pub mod widgets;

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use crate::error::{Result, TapwordError};
pub use app::{App, AppResult, Focus};

/// How long one loop pass waits for a key
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run the keyboard until the user quits
pub async fn run_tui(mut app: App) -> Result<()> {
    install_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Leave raw mode before a panic message is printed
fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.reconciler.start();

    loop {
        run_app_iteration(terminal, app)?;

        match input::handle_input(app, POLL_INTERVAL)? {
            AppResult::Continue => {}
            AppResult::Quit => break,
        }

        // Let timers and fetches make progress on this worker
        tokio::task::yield_now().await;
    }

    tracing::debug!(target: "tapword.tui", text = app.reconciler.text(), "keyboard closed");
    Ok(())
}

/// Apply finished background work and redraw
fn run_app_iteration<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    app.process_background();
    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| TapwordError::Tui(e.to_string()))?;
    Ok(())
}
