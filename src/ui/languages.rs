//! # Language table
//!
//! One row per language, with a colour badge, the file count and the three
//! line counts plus their sum. Only the rows inside the scroll window are
//! built; the rest of the result set is never touched while drawing.
//!
//! ## Columns
//!
//! | Column | Width | Notes |
//! |--------|-------|-------|
//! | Language | `languages.name` + 3 | cursor mark, `●` badge in the language colour, name |
//! | Files | `languages.files` | right-aligned |
//! | Blank | `languages.blank` | right-aligned |
//! | Comment | `languages.comment` | right-aligned |
//! | Code | `languages.code` | right-aligned |
//! | Total | `languages.total` | right-aligned |

use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::{
    ACCENT, BLANK_COLOR, CODE_COLOR, COMMENT_COLOR, FILES_COLOR, TOTAL_COLOR, cursor_row_style,
    header_label, header_style, help_bar, left, palette::LanguagePalette, right, status_bar,
    table_block, table_screen, truncate_left,
};
use crate::{
    app::App,
    layout::{LanguageColumns, ROW_PREFIX_WIDTH},
    sort::{SortColumn, SortSpec},
};

/// One-cell cursor mark; the badge after it keeps it apart from the name.
const ROW_MARK: &str = "▶";
const NO_ROW_MARK: &str = " ";

pub fn render_languages(f: &mut Frame, app: &App, palette: &dyn LanguagePalette) {
    let layout = &app.layout;
    let screen = table_screen(f.area(), layout.visible_rows);

    // ── Title ─────────────────────────────────────────────────────────────────
    let target = app.target().to_string_lossy();
    let title = match app.revision() {
        Some(rev) => format!(" 📊 gloc - {target} @ {rev} "),
        None => format!(" 📊 gloc - {target} "),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            truncate_left(&title, screen.title.width as usize),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))),
        screen.title,
    );

    // ── Table ─────────────────────────────────────────────────────────────────
    let block = table_block();
    let inner = block.inner(screen.table);
    f.render_widget(block, screen.table);

    let cols = layout.languages;
    let rows = app.language_rows();
    let cursor = app.cursor();

    let mut lines = vec![header_line(cols, app.language_sort)];
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No source files found.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let start = cursor.window_start(layout.visible_rows);
    for (i, lang) in rows
        .iter()
        .enumerate()
        .skip(start)
        .take(layout.visible_rows)
    {
        let selected = i == cursor.index;
        let mark = if selected { ROW_MARK } else { NO_ROW_MARK };
        let line = Line::from(vec![
            Span::styled(mark, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("●", Style::default().fg(palette.color(&lang.name))),
            Span::raw(" "),
            Span::raw(left(&lang.name, cols.name)),
            Span::raw(" "),
            number(lang.file_count, cols.files, FILES_COLOR),
            Span::raw(" "),
            number(lang.blank, cols.blank, BLANK_COLOR),
            Span::raw(" "),
            number(lang.comment, cols.comment, COMMENT_COLOR),
            Span::raw(" "),
            number(lang.code, cols.code, CODE_COLOR),
            Span::raw(" "),
            number(lang.total(), cols.total, TOTAL_COLOR),
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
            ("Enter", "View files"),
            ("1-6", "Sort"),
            ("Q", "Quit"),
        ]),
        screen.help,
    );
}

fn header_line(cols: LanguageColumns, spec: SortSpec) -> Line<'static> {
    let cell = |label: &str, column: SortColumn, width: usize, numeric: bool| {
        let text = header_label(label, column, spec);
        let text = if numeric {
            right(&text, width)
        } else {
            left(&text, width)
        };
        Span::styled(text, header_style(spec.column == column))
    };

    Line::from(vec![
        cell("Language", SortColumn::Name, cols.name + ROW_PREFIX_WIDTH, false),
        Span::raw(" "),
        cell("Files", SortColumn::Files, cols.files, true),
        Span::raw(" "),
        cell("Blank", SortColumn::Blank, cols.blank, true),
        Span::raw(" "),
        cell("Comment", SortColumn::Comment, cols.comment, true),
        Span::raw(" "),
        cell("Code", SortColumn::Code, cols.code, true),
        Span::raw(" "),
        cell("Total", SortColumn::Total, cols.total, true),
    ])
}

fn number(value: u64, width: usize, color: Color) -> Span<'static> {
    Span::styled(right(&value.to_string(), width), Style::default().fg(color))
}

#[cfg(test)]
mod tests {
    use crate::{
        app::{
            Command,
            tests::{lang, ready_app},
        },
        sort::SortColumn,
        ui::tests::render,
    };

    #[test]
    fn shows_languages_in_sorted_order_with_totals() {
        let app = ready_app(vec![lang("TS", 2, 150), lang("Go", 3, 300)], 100, 24);
        let screen = render(&app, 100, 24);

        let go = screen.find("Go").unwrap();
        let ts = screen.find("TS").unwrap();
        assert!(go < ts);
        assert!(screen.contains("[5] Code ▼"));
        assert!(screen.contains("[1] Language"));
        assert!(screen.contains("Total: 5 files"));
        assert!(screen.contains("450 code"));
        assert!(screen.contains("▶● Go"));
    }

    #[test]
    fn only_the_scroll_window_is_drawn() {
        let mut app = ready_app(
            (0..40).map(|i| lang(&format!("Lang{i:02}"), 1, 100 - i)).collect(),
            80,
            20,
        );
        let screen = render(&app, 80, 20);
        assert!(screen.contains("Lang00"));
        assert!(screen.contains("Lang07"));
        assert!(!screen.contains("Lang08"));

        app.handle(Command::End);
        let screen = render(&app, 80, 20);
        assert!(!screen.contains("Lang31"));
        assert!(screen.contains("Lang32"));
        assert!(screen.contains("Lang39"));
    }

    #[test]
    fn shrunken_window_still_shows_the_cursor() {
        let mut app = ready_app(
            (0..40).map(|i| lang(&format!("Lang{i:02}"), 1, 100 - i)).collect(),
            80,
            40,
        );
        for _ in 0..20 {
            app.handle(Command::Down);
        }
        app.resize(80, 20);

        let screen = render(&app, 80, 20);
        assert!(screen.contains("▶● Lang20"));
    }

    #[test]
    fn empty_result_renders_a_placeholder_row() {
        let app = ready_app(Vec::new(), 80, 24);
        let screen = render(&app, 80, 24);
        assert!(screen.contains("No source files found."));
        assert!(screen.contains("Total: 0 files"));
    }

    #[test]
    fn ascending_name_sort_shows_up_arrow() {
        let mut app = ready_app(vec![lang("Go", 1, 1)], 100, 24);
        app.handle(Command::Sort(SortColumn::Name));
        let screen = render(&app, 100, 24);
        assert!(screen.contains("[1] Language ▲"));
        assert!(screen.contains("[5] Code"));
        assert!(!screen.contains("[5] Code ▼"));
    }

    #[test]
    fn total_column_reaches_the_right_border() {
        for width in [80, 100, 120, 200] {
            let app = ready_app(vec![lang("Go", 3, 123456)], width, 24);
            let screen = render(&app, width, 24);
            let row = screen.lines().find(|l| l.contains("▶● Go")).unwrap();

            assert!(row.contains(" 123456 "), "width {width}: {row}");
            assert!(row.trim_end().ends_with(" 123459│"), "width {width}: {row}");
        }
    }

    #[test]
    fn rendering_is_repeatable() {
        let app = ready_app(vec![lang("Go", 3, 300)], 90, 30);
        assert_eq!(render(&app, 90, 30), render(&app, 90, 30));
    }
}
