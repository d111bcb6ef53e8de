//! # Loading and error screens
//!
//! Shown instead of the tables while there is nothing to put in them.
//!
//! ## Loading
//!
//! ```text
//! ┌─ 📊 gloc  ⠹  Counting lines… ─────────────────────────────────┐
//! │                                                               │
//! │   Running cloc on                                             │
//! │   …/alice/projects/some-repo                                  │
//! │                                                               │
//! ├───────────────────────────────────────────────────────────────┤
//! │  [Q] Quit                                                     │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error
//!
//! The analysis failed and will not be retried. The message is wrapped to the
//! terminal width and the only action left is to quit.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::{SPINNER, help_bar, truncate_left};
use crate::app::App;

/// Renders the loading screen into `f`.
pub fn render_loading(f: &mut Frame, app: &App) {
    let area = f.area();

    // Each spinner frame is held for two ticks.
    let spinner = SPINNER[(app.ticker as usize / 2) % SPINNER.len()];

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" 📊 gloc  {spinner}  Counting lines… "),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = split(inner, 4);
    let dim = Style::default().fg(Color::Reset).add_modifier(Modifier::DIM);
    let max_width = inner.width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("  Running cloc on", dim)),
        Line::from(Span::styled(
            format!("  {}", truncate_left(&app.target().to_string_lossy(), max_width)),
            Style::default().fg(Color::Cyan),
        )),
    ];
    if let Some(rev) = app.revision() {
        lines.push(Line::from(vec![
            Span::styled("  at revision ", dim),
            Span::styled(rev.to_string(), Style::default().fg(Color::Cyan)),
        ]));
    }
    f.render_widget(Paragraph::new(lines), chunks[0]);

    f.render_widget(help_bar(&[("Q", "Quit")]), chunks[2]);
}

/// Renders the error screen for a failed analysis.
pub fn render_error(f: &mut Frame, message: &str) {
    let area = f.area();

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            " 📊 gloc  ·  Error ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = split(inner, 0);

    let mut lines = vec![Line::from("")];
    lines.extend(message.lines().map(|line| {
        Line::from(Span::styled(
            format!("  ✗  {line}"),
            Style::default().fg(Color::Red),
        ))
    }));
    f.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        chunks[0],
    );

    f.render_widget(help_bar(&[("Q", "Quit")]), chunks[2]);
}

/// Content on top, help bar pinned to the bottom.
fn split(inner: Rect, content_height: u16) -> Vec<Rect> {
    let content = if content_height == 0 {
        Constraint::Min(0)
    } else {
        Constraint::Length(content_height)
    };
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            content,
            Constraint::Min(0),    // spacer
            Constraint::Length(2), // help bar
        ])
        .split(inner)
        .to_vec()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::{
        app::{App, tests::request},
        backend::{AnalysisDone, AnalysisMode},
        error::GlocError,
        layout::TableLayout,
        ui::tests::render,
    };

    #[test]
    fn loading_screen_names_the_target() {
        let app = App::new(request(), TableLayout::default());
        let screen = render(&app, 80, 24);
        assert!(screen.contains("Counting lines"));
        assert!(screen.contains("/repo"));
        assert!(screen.contains("Quit"));
    }

    #[test]
    fn loading_screen_shows_the_revision() {
        let mut req = request();
        req.mode = AnalysisMode::Revision("abc1234".to_string());
        let app = App::new(req, TableLayout::default());
        assert!(render(&app, 80, 24).contains("at revision abc1234"));
    }

    #[test]
    fn error_screen_shows_the_message() {
        let mut app = App::new(request(), TableLayout::default());
        app.install(AnalysisDone {
            result: Err(GlocError::backend("cloc", "Unable to read: /repo")),
            elapsed: Duration::ZERO,
        });
        let screen = render(&app, 80, 24);
        assert!(screen.contains("Error"));
        assert!(screen.contains("cloc failed: Unable to read: /repo"));
    }
}
