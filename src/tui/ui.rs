// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! UI rendering for the TUI
//!
//! Top to bottom: title bar, text, error banner (only after a failed
//! request), suggestion row, virtual keyboard, help line.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::app::{App, Focus};
use super::widgets::{KeyboardWidget, StatusBar, SuggestionBar};

/// Drawn after the last character of the text
const CURSOR: char = '▏';

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let error = app.reconciler.error();
    let keyboard_rows = app.layout.rows().len() as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                  // Title
            Constraint::Min(3),                                     // Text
            Constraint::Length(if error.is_some() { 3 } else { 0 }), // Error
            Constraint::Length(3),                                  // Suggestions
            Constraint::Length(keyboard_rows * 2 + 1),              // Keyboard
            Constraint::Length(1),                                  // Help
        ])
        .split(frame.area());

    let status = StatusBar::new("tapword", &app.provider, &app.model)
        .fetching(app.reconciler.is_loading())
        .pending_corrections(app.reconciler.pending_corrections());
    frame.render_widget(status, chunks[0]);

    draw_text(frame, chunks[1], app);

    if let Some(message) = error {
        draw_error(frame, chunks[2], message);
    }

    draw_suggestions(frame, chunks[3], app);
    draw_keyboard(frame, chunks[4], app);
    draw_help(frame, chunks[5], app);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Split `text` into rows of at most `width` chars
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(width).map(|row| row.iter().collect()).collect()
}

/// Draw the document, scrolled so the cursor stays visible
fn draw_text(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Text ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let with_cursor = format!("{}{CURSOR}", app.reconciler.text());
    let rows = wrap_chars(&with_cursor, inner.width as usize);
    let skip = rows.len().saturating_sub(inner.height as usize);
    let last = rows.len().saturating_sub(1);

    let cursor_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::SLOW_BLINK);
    let lines: Vec<Line> = rows
        .into_iter()
        .enumerate()
        .skip(skip)
        .map(|(idx, row)| {
            if idx == last {
                if let Some(body) = row.strip_suffix(CURSOR) {
                    return Line::from(vec![
                        Span::raw(body.to_string()),
                        Span::styled(CURSOR.to_string(), cursor_style),
                    ]);
                }
            }
            Line::raw(row)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_error(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Error ");

    let banner = Paragraph::new(format!(" ⚠ {message}"))
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(banner, area);
}

fn draw_suggestions(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Suggestions;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title(" Suggestions ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bar = SuggestionBar::new(app.reconciler.suggestions())
        .selected(focused.then_some(app.suggestion_index))
        .loading(app.reconciler.is_loading());
    frame.render_widget(bar, inner);
}

fn draw_keyboard(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Keyboard;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_border(focused))
        .title(" Keyboard ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let keyboard =
        KeyboardWidget::new(&app.layout).highlighted(focused.then_some(app.key_cursor));
    frame.render_widget(keyboard, inner);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.focus {
        Focus::Keyboard => {
            "Type, or ←↑↓→ + Enter: Press key | Tab: Suggestions | Alt+1-9: Pick | Esc: Quit"
        }
        Focus::Suggestions => "←→: Choose | Enter: Insert | Tab: Keyboard | Esc: Quit",
    };

    let paragraph =
        Paragraph::new(format!(" {help}")).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Reconciler, ReconcilerConfig};
    use crate::llm::mock_provider::{MockProvider, MockResponse};
    use crate::predict::QueryClient;
    use crate::tui::widgets::suggestion_bar::PLACEHOLDER;
    use ratatui::backend::TestBackend;
    use std::sync::Arc;
    use std::time::Duration;

    fn app(provider: &MockProvider, text: &str) -> App {
        let client = QueryClient::new(Arc::new(provider.clone()));
        let config = ReconcilerConfig {
            debounce: Duration::from_millis(200),
            autocorrect: false,
        };
        App::new(Reconciler::new(client, config, text), "mock-model").with_provider("mock")
    }

    async fn settle(app: &mut App) {
        while !app.reconciler.is_quiescent() {
            let event = app.reconciler.next_event().await.unwrap();
            app.reconciler.handle_event(event);
        }
    }

    fn screen(app: &App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_wrap_chars() {
        assert_eq!(wrap_chars("abcdef", 4), vec!["abcd", "ef"]);
        assert_eq!(wrap_chars("", 4), vec![""]);
        assert!(wrap_chars("abc", 0).is_empty());
    }

    #[test]
    fn test_draw_initial_screen() {
        let app = app(&MockProvider::new(), "The quick brown fox ");
        let screen = screen(&app);

        assert!(screen.contains("tapword"));
        assert!(screen.contains("mock / mock-model"));
        assert!(screen.contains("The quick brown fox"));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains(" Keyboard "));
        assert!(!screen.contains(" Error "));
    }

    #[test]
    fn test_draw_long_text_keeps_tail_visible() {
        let text = format!("{}the end", "word ".repeat(200));
        let app = app(&MockProvider::new(), &text);
        assert!(screen(&app).contains("the end"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_suggestions() {
        let provider = MockProvider::new().with_predictions(&["jumps", "runs"]);
        let mut app = app(&provider, "the fox ");
        app.reconciler.start();
        settle(&mut app).await;

        let screen = screen(&app);
        assert!(screen.contains("1 jumps"));
        assert!(screen.contains("2 runs"));
        assert!(!screen.contains(PLACEHOLDER));
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_error_banner() {
        let provider = MockProvider::new().with_prediction_responses(vec![MockResponse::failure()]);
        let mut app = app(&provider, "the fox ");
        app.reconciler.start();
        settle(&mut app).await;

        let screen = screen(&app);
        assert!(screen.contains(" Error "));
        assert!(screen.contains("Failed to get suggestions"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_help_follows_focus() {
        let provider = MockProvider::new().with_predictions(&["jumps"]);
        let mut app = app(&provider, "the fox ");
        assert!(screen(&app).contains("Tab: Suggestions"));

        app.reconciler.start();
        settle(&mut app).await;
        app.focus_suggestions();
        assert!(screen(&app).contains("Enter: Insert"));
    }

    #[test]
    fn test_draw_small_terminal_does_not_panic() {
        let app = app(&MockProvider::new(), "hello ");
        let backend = TestBackend::new(20, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, &app)).unwrap();
    }
}
