//! # File table
//!
//! The files of the language picked in the language table. Paths are shown
//! relative to the analysis target and left-truncated, so the file name is
//! always visible even for deeply nested files.
//!
//! The title badge uses the language's colour as its background so it's
//! obvious which language is being drilled into.

use std::path::Path;

use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    ACCENT, BLANK_COLOR, CODE_COLOR, COMMENT_COLOR, CURSOR_MARK, NO_CURSOR_MARK, TOTAL_COLOR,
    cursor_row_style, header_label, header_style, help_bar, left, palette::LanguagePalette,
    right, status_bar, table_block, table_screen, truncate_left,
};
use crate::{
    app::App,
    layout::FileColumns,
    sort::{SortColumn, SortSpec},
};

pub fn render_files(f: &mut Frame, app: &App, palette: &dyn LanguagePalette) {
    let layout = &app.layout;
    let screen = table_screen(f.area(), layout.visible_rows);
    let language = app.view.selected_language.as_deref().unwrap_or_default();
    let rows = app.file_rows();

    // ── Title ─────────────────────────────────────────────────────────────────
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" 📁 {language} Files "),
                Style::default()
                    .fg(Color::White)
                    .bg(palette.color(language))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} shown", rows.len()),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        screen.title,
    );

    // ── Table ─────────────────────────────────────────────────────────────────
    let block = table_block();
    let inner = block.inner(screen.table);
    f.render_widget(block, screen.table);

    let cols = layout.files;
    let cursor = app.cursor();
    let path_width = cols.path.saturating_sub(CURSOR_MARK.chars().count());

    let mut lines = vec![header_line(cols, app.file_sort)];
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No files recorded for this language.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let start = cursor.window_start(layout.visible_rows);
    for (i, file) in rows
        .iter()
        .enumerate()
        .skip(start)
        .take(layout.visible_rows)
    {
        let selected = i == cursor.index;
        let mark = if selected { CURSOR_MARK } else { NO_CURSOR_MARK };
        let path = truncate_left(&display_path(app.target(), &file.path), path_width);
        let line = Line::from(vec![
            Span::styled(mark, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::raw(left(&path, path_width)),
            Span::raw(" "),
            number(file.blank, cols.number, BLANK_COLOR),
            Span::raw(" "),
            number(file.comment, cols.number, COMMENT_COLOR),
            Span::raw(" "),
            number(file.code, cols.number, CODE_COLOR),
            Span::raw(" "),
            number(file.total(), cols.number, TOTAL_COLOR),
        ]);
        lines.push(if selected {
            line.style(cursor_row_style())
        } else {
            line
        });
    }
    f.render_widget(Paragraph::new(lines), inner);

    // ── Status + help ─────────────────────────────────────────────────────────
    f.render_widget(status_bar(app), screen.status);
    f.render_widget(
        help_bar(&[
            ("↑↓ / jk", "Navigate"),
            ("1,3-6", "Sort"),
            ("Esc / Q", "Back"),
            ("Ctrl+C", "Quit"),
        ]),
        screen.help,
    );
}

/// `path` relative to the analysis target, or unchanged if it lies elsewhere.
pub fn display_path(target: &Path, path: &str) -> String {
    let shown = Path::new(path)
        .strip_prefix(target)
        .map(|rel| rel.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string());
    match shown.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => shown,
    }
}

fn header_line(cols: FileColumns, spec: SortSpec) -> Line<'static> {
    let cell = |label: &str, column: SortColumn| {
        Span::styled(
            right(&header_label(label, column, spec), cols.number),
            header_style(spec.column == column),
        )
    };

    Line::from(vec![
        Span::styled(
            left(&header_label("File", SortColumn::Name, spec), cols.path),
            header_style(spec.column == SortColumn::Name),
        ),
        Span::raw(" "),
        cell("Blank", SortColumn::Blank),
        Span::raw(" "),
        cell("Comment", SortColumn::Comment),
        Span::raw(" "),
        cell("Code", SortColumn::Code),
        Span::raw(" "),
        cell("Total", SortColumn::Total),
    ])
}

fn number(value: u64, width: usize, color: Color) -> Span<'static> {
    Span::styled(right(&value.to_string(), width), Style::default().fg(color))
}
