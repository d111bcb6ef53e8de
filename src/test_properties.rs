//! Property-based invariant tests.
//!
//! 1. Every merged file group belongs to a language row, and the total is the
//!    sum of the language rows.
//! 2. Sorting twice is the same as sorting once.
//! 3. Without ties, ascending order is descending order reversed.
//! 4. The cursor stays inside the table and the drawn window whatever the
//!    user presses and however the terminal is resized.
//! 5. Column widths never drop below their minimums, and rows fill the table
//!    exactly once there is room for them.

use proptest::prelude::*;
use serde_json::{Map, Value, json};

use crate::{
    app::{
        Command,
        tests::{lang, ready_app},
    },
    layout::{FILE_NUMBERS_TOTAL, LanguageColumns, MIN_PATH_WIDTH, TableLayout},
    sort::{SortColumn, SortSpec, sort_languages, sorted_files},
    stats::{FileStat, LanguageStat, ResultSet, sum_languages},
};

// ── Strategies ──────────────────────────────────────────────────────────

const NAMES: [&str; 6] = ["Rust", "Go", "TOML", "Markdown", "C", "Shell"];

fn counts() -> impl Strategy<Value = (u64, u64, u64)> {
    (0u64..5_000, 0u64..5_000, 0u64..50_000)
}

fn language_stats() -> impl Strategy<Value = Vec<LanguageStat>> {
    prop::collection::vec((0..NAMES.len(), 0u64..500, counts()), 0..12).prop_map(|rows| {
        rows.into_iter()
            .map(|(name, files, (blank, comment, code))| LanguageStat {
                name: NAMES[name].to_string(),
                file_count: files,
                blank,
                comment,
                code,
            })
            .collect()
    })
}

/// Pairs of (language index, counts). Index `NAMES.len()` names a language
/// that never appears in the by-language report.
fn file_entries() -> impl Strategy<Value = Vec<(usize, (u64, u64, u64))>> {
    prop::collection::vec((0..=NAMES.len(), counts()), 0..40)
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Up),
        Just(Command::Down),
        Just(Command::Home),
        Just(Command::End),
        Just(Command::Open),
        Just(Command::Back),
        (0..SortColumn::ALL.len()).prop_map(|i| Command::Sort(SortColumn::ALL[i])),
    ]
}

#[derive(Debug, Clone)]
enum Step {
    Press(Command),
    Resize(u16, u16),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => command().prop_map(Step::Press),
        1 => (0u16..300, 0u16..80).prop_map(|(w, h)| Step::Resize(w, h)),
    ]
}

fn reports(languages: &[usize], files: &[(usize, (u64, u64, u64))]) -> (String, String) {
    let mut by_language = Map::new();
    by_language.insert("header".into(), json!({ "cloc_version": "2.00" }));
    for &i in languages {
        by_language.insert(
            NAMES[i].into(),
            json!({ "nFiles": 1, "blank": 1, "comment": 1, "code": 10 * (i + 1) }),
        );
    }
    by_language.insert(
        "SUM".into(),
        json!({ "nFiles": 0, "blank": 0, "comment": 0, "code": 0 }),
    );

    let mut by_file = Map::new();
    for (n, (lang, (blank, comment, code))) in files.iter().enumerate() {
        let name = NAMES.get(*lang).copied().unwrap_or("Ghost");
        by_file.insert(
            format!("./src/{n}.{name}"),
            json!({ "blank": blank, "comment": comment, "code": code, "language": name }),
        );
    }

    (
        Value::Object(by_language).to_string(),
        Value::Object(by_file).to_string(),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Merge keeps file groups and totals consistent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merged_files_always_have_a_language_row(
        languages in prop::collection::btree_set(0..NAMES.len(), 0..NAMES.len()),
        files in file_entries(),
    ) {
        let languages: Vec<usize> = languages.into_iter().collect();
        let (by_language, by_file) = reports(&languages, &files);
        let result = ResultSet::from_reports("cloc", &by_language, &by_file).unwrap();

        prop_assert_eq!(result.languages.len(), languages.len());
        for (name, group) in &result.files_by_language {
            prop_assert!(result.languages.iter().any(|l| &l.name == name));
            prop_assert!(group.iter().all(|f| &f.language == name));
        }

        let kept = files
            .iter()
            .filter(|(lang, _)| languages.contains(lang))
            .count();
        prop_assert_eq!(result.file_count(), kept);
        prop_assert_eq!(&result.total, &sum_languages(&result.languages));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Sorting is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sorting_twice_changes_nothing(
        mut rows in language_stats(),
        column in 0..SortColumn::ALL.len(),
        ascending in any::<bool>(),
    ) {
        let spec = SortSpec { column: SortColumn::ALL[column], ascending };
        sort_languages(&mut rows, spec);
        let once = rows.clone();
        sort_languages(&mut rows, spec);
        prop_assert_eq!(rows, once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Ascending is descending reversed when keys are distinct
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ascending_reverses_descending(
        codes in prop::collection::hash_set(0u64..1_000_000, 0..30),
    ) {
        let files: Vec<FileStat> = codes
            .iter()
            .enumerate()
            .map(|(i, &code)| FileStat {
                path: format!("f{i}"),
                language: "Rust".into(),
                blank: 0,
                comment: 0,
                code,
            })
            .collect();

        let down = SortSpec { column: SortColumn::Code, ascending: false };
        let up = SortSpec { column: SortColumn::Code, ascending: true };
        let mut descending = sorted_files(&files, down);
        descending.reverse();
        prop_assert_eq!(sorted_files(&files, up), descending);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Cursor stays in range and on screen
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn cursor_stays_visible(
        sizes in prop::collection::vec((1u64..60, 1u64..1_000), 0..30),
        steps in prop::collection::vec(step(), 0..80),
    ) {
        let languages = sizes
            .iter()
            .enumerate()
            .map(|(i, &(files, code))| lang(&format!("Lang{i}"), files, code))
            .collect();
        let mut app = ready_app(languages, 100, 30);

        for step in steps {
            match step {
                Step::Press(cmd) => {
                    app.handle(cmd);
                }
                Step::Resize(w, h) => app.resize(w, h),
            }

            let rows = app.row_count();
            let cursor = app.cursor();
            let visible = app.layout.visible_rows;
            if rows == 0 {
                prop_assert_eq!(cursor.index, 0);
                continue;
            }
            prop_assert!(cursor.index < rows, "{:?} with {} rows", cursor, rows);

            let start = cursor.window_start(visible);
            prop_assert!(start <= cursor.index);
            prop_assert!(cursor.index < start + visible);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Widths never drop below minimums
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_respects_minimums(width in any::<u16>(), height in any::<u16>()) {
        let layout = TableLayout::compute(width, height);
        let cols = layout.languages;
        let min = LanguageColumns::MIN;

        prop_assert!(layout.visible_rows >= 1);
        prop_assert!(cols.name >= min.name);
        prop_assert!(cols.files >= min.files);
        prop_assert!(cols.blank >= min.blank);
        prop_assert!(cols.comment >= min.comment);
        prop_assert!(cols.code >= min.code);
        prop_assert_eq!(cols.total, cols.code);
        prop_assert!(layout.files.path >= MIN_PATH_WIDTH);

        if layout.inner_width >= min.row_width() {
            prop_assert_eq!(cols.row_width(), layout.inner_width);
        }
        if layout.inner_width >= MIN_PATH_WIDTH + FILE_NUMBERS_TOTAL {
            prop_assert_eq!(layout.files.path + FILE_NUMBERS_TOTAL, layout.inner_width);
        }
    }
}
