//! # UI layer
//!
//! This module is the top-level entry point for all rendering. On every
//! event-loop tick, [`ui`] is called with the current [`App`] state and a
//! Ratatui [`Frame`] to draw into. It looks at the analysis phase and the
//! active table and delegates to the appropriate sub-module.
//!
//! Rendering only reads the state. Drawing the same `App` twice produces the
//! same frame.
//!
//! ## Module layout
//!
//! | Module | What it renders |
//! |--------|-----------------|
//! | [`loading`] | [`Phase::Loading`] spinner and [`Phase::Failed`] error screen |
//! | [`languages`] | the per-language table |
//! | [`files`] | the per-file table of one language |
//! | [`palette`] | language → badge colour lookup |
//!
//! ## Screen layout (both tables)
//!
//! ```text
//!   📊 gloc - /home/alice/project                                  title
//!
//!  ┌──────────────────────────────────────────────────────────────┐
//!  │ [1] Language   [2] Files  [3] Blank  [4] Comment  [5] Code ▼ │  header
//!  │ ▶ ● Rust            12       340        120        4 210     │  rows
//!  │   ● TOML             3         4          1           60     │
//!  └──────────────────────────────────────────────────────────────┘
//!   Total: 15 files │ 344 blank │ 121 comment │ 4 270 code │ …      status
//!  ─────────────────────────────────────────────────────────────────
//!   ↑↓ / jk  Navigate   Enter  View files   1-6  Sort   Q  Quit     help
//! ```

pub mod files;
pub mod languages;
pub mod loading;
pub mod palette;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::{App, Phase},
    sort::{SortColumn, SortSpec},
    view::Mode,
};
use palette::LanguagePalette;

// ─── Constants ────────────────────────────────────────────────────────────────

/// Braille spinner frames, cycled by the animation ticker.
pub const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Accent used for the title, cursor and key hints.
pub const ACCENT: Color = Color::Rgb(0x7d, 0xc4, 0xe4);

pub const FILES_COLOR: Color = Color::Rgb(0xc6, 0xa0, 0xf6);
pub const BLANK_COLOR: Color = Color::Rgb(0x93, 0x9a, 0xb7);
pub const COMMENT_COLOR: Color = Color::Rgb(0xee, 0xd4, 0x9f);
pub const CODE_COLOR: Color = Color::Rgb(0xa6, 0xda, 0x95);
pub const TOTAL_COLOR: Color = Color::Rgb(0xf5, 0xa9, 0x7f);

/// Marker in front of the highlighted row.
pub const CURSOR_MARK: &str = "▶ ";
pub const NO_CURSOR_MARK: &str = "  ";

// ─── Dispatch ─────────────────────────────────────────────────────────────────

/// Draws the current state into `f`.
///
/// `palette` supplies the language badge colours.
pub fn ui(f: &mut Frame, app: &App, palette: &dyn LanguagePalette) {
    match &app.phase {
        Phase::Loading => loading::render_loading(f, app),
        Phase::Failed(message) => loading::render_error(f, message),
        Phase::Ready(_) => match app.view.mode {
            Mode::Languages => languages::render_languages(f, app, palette),
            Mode::Files => files::render_files(f, app, palette),
        },
    }
}

// ─── Shared layout ────────────────────────────────────────────────────────────

/// The regions every table screen is divided into.
pub struct TableScreen {
    pub title: Rect,
    pub table: Rect,
    pub status: Rect,
    pub help: Rect,
}

/// Splits the frame for a table with room for `visible_rows` data rows.
///
/// The table box is exactly as tall as the window needs: two border lines,
/// one header line and the rows. Spare height collects below it.
pub fn table_screen(area: Rect, visible_rows: usize) -> TableScreen {
    let table_height = (visible_rows as u16).saturating_add(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // title
            Constraint::Length(1),            // gap
            Constraint::Length(table_height), // table box
            Constraint::Length(1),            // status bar
            Constraint::Min(0),               // spacer
            Constraint::Length(2),            // help bar
        ])
        .split(padded_area(area));

    TableScreen {
        title: chunks[0],
        table: chunks[2],
        status: chunks[3],
        help: chunks[5],
    }
}

/// Returns `area` without one row of padding at the top and bottom and two
/// columns on each side.
pub fn padded_area(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    }
}

/// The bordered box the table rows are drawn inside.
pub fn table_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

// ─── Shared widgets ───────────────────────────────────────────────────────────

/// Builds the help bar shown at the bottom of every screen.
///
/// `pairs` is a slice of `(key, description)` tuples. Each key is rendered
/// like a keycap, with its description next to it.
pub fn help_bar<'a>(pairs: &[(&'a str, &'a str)]) -> Paragraph<'a> {
    let mut spans: Vec<Span<'a>> = Vec::new();

    for (i, (key, desc)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::REVERSED)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {desc}"),
            Style::default().fg(Color::Gray),
        ));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
}

/// The one-line totals summary under the table.
pub fn status_bar(app: &App) -> Paragraph<'static> {
    let Some(result) = app.result() else {
        return Paragraph::new("");
    };
    let total = &result.total;
    let sep = || Span::styled(" │ ", Style::default().fg(Color::DarkGray));
    let dim = Style::default().fg(Color::Gray);

    let mut spans = vec![
        Span::styled(" Total: ", dim),
        Span::styled(total.file_count.to_string(), Style::default().fg(FILES_COLOR)),
        Span::styled(" files", dim),
        sep(),
        Span::styled(total.blank.to_string(), Style::default().fg(BLANK_COLOR)),
        Span::styled(" blank", dim),
        sep(),
        Span::styled(total.comment.to_string(), Style::default().fg(COMMENT_COLOR)),
        Span::styled(" comment", dim),
        sep(),
        Span::styled(total.code.to_string(), Style::default().fg(CODE_COLOR)),
        Span::styled(" code", dim),
        sep(),
        Span::styled(total.total().to_string(), Style::default().fg(TOTAL_COLOR)),
        Span::styled(" lines", dim),
    ];
    if let Some(elapsed) = app.elapsed {
        spans.push(Span::styled(
            format!("   ({:.1}s)", elapsed.as_secs_f64()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans))
}

/// Header label for `column`, with an arrow when the table is sorted by it.
pub fn header_label(label: &str, column: SortColumn, spec: SortSpec) -> String {
    let name = format!("[{}] {label}", column.digit());
    if spec.column != column {
        return name;
    }
    if spec.ascending {
        format!("{name} ▲")
    } else {
        format!("{name} ▼")
    }
}

pub fn header_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::White)
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }
}

/// Background of the highlighted row.
pub fn cursor_row_style() -> Style {
    Style::default()
        .bg(Color::Rgb(0x30, 0x34, 0x46))
        .add_modifier(Modifier::BOLD)
}

// ─── Text helpers ─────────────────────────────────────────────────────────────

/// Truncates `s` to at most `max_width` characters, eliding from the **left**.
///
/// Used for paths, where the end is more meaningful than the root prefix.
pub fn truncate_left(s: &str, max_width: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let start = chars.len() - max_width + 1;
    format!("…{}", chars[start..].iter().collect::<String>())
}

/// Truncates `s` to at most `max_width` characters, eliding from the right.
pub fn truncate_right(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let kept: String = s.chars().take(max_width - 1).collect();
    format!("{kept}…")
}

/// Right-aligns `value` in a column of `width`, truncating if it can't fit.
pub fn right(value: &str, width: usize) -> String {
    format!("{:>width$}", truncate_right(value, width))
}

/// Left-aligns `value` in a column of `width`, truncating if it can't fit.
pub fn left(value: &str, width: usize) -> String {
    format!("{:<width$}", truncate_right(value, width))
}

#[cfg(test)]
pub(crate) mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::App;
    use palette::LinguistPalette;

    /// Draws `app` on a `width`×`height` test terminal and returns the screen
    /// as text, one line per row.
    pub(crate) fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| ui(f, app, &LinguistPalette)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn truncate_left_keeps_the_tail() {
        assert_eq!(truncate_left("src/main.rs", 20), "src/main.rs");
        assert_eq!(truncate_left("a/b/c/d/main.rs", 8), "…main.rs");
        assert_eq!(truncate_left("abc", 0), "");
    }

    #[test]
    fn truncate_right_keeps_the_head() {
        assert_eq!(truncate_right("[4] Comment ▼", 10), "[4] Comme…");
        assert_eq!(truncate_right("Go", 10), "Go");
        assert_eq!(truncate_right("Go", 0), "");
    }

    #[test]
    fn columns_are_padded_to_width() {
        assert_eq!(right("42", 6), "    42");
        assert_eq!(left("Go", 5), "Go   ");
        assert_eq!(right("1234567", 4), "123…");
    }

    #[test]
    fn header_marks_the_active_column() {
        let spec = SortSpec::default();
        assert_eq!(header_label("Code", SortColumn::Code, spec), "[5] Code ▼");
        assert_eq!(header_label("Blank", SortColumn::Blank, spec), "[3] Blank");
        let asc = spec.toggled(SortColumn::Code);
        assert_eq!(header_label("Code", SortColumn::Code, asc), "[5] Code ▲");
    }

    #[test]
    fn padded_area_never_underflows() {
        let area = padded_area(Rect::new(0, 0, 3, 1));
        assert_eq!(area.width, 0);
        assert_eq!(area.height, 0);
    }
}
