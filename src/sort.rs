//! # Sorting
//!
//! Both tables can be ordered by any of their columns. The ordering rules are
//! shared between the two views:
//!
//! | Column | Key | Default direction |
//! |--------|-----|-------------------|
//! | Name | case-insensitive name or path | ascending |
//! | Files | file count (language view only) | descending |
//! | Blank / Comment / Code | that line count | descending |
//! | Total | blank + comment + code | descending |
//!
//! Sorting is stable in both directions. Rows with equal keys keep the order
//! they had before the sort, so pressing the same key twice on a column full
//! of ties does not shuffle the table.

use std::cmp::{Ordering, Reverse};

use crate::stats::{FileStat, LanguageStat};

/// A sortable table column. The discriminant order matches the `1`–`6` keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Files,
    Blank,
    Comment,
    Code,
    Total,
}

impl SortColumn {
    pub const ALL: [SortColumn; 6] = [
        SortColumn::Name,
        SortColumn::Files,
        SortColumn::Blank,
        SortColumn::Comment,
        SortColumn::Code,
        SortColumn::Total,
    ];

    /// Maps a `1`–`6` key to its column.
    pub fn from_digit(digit: char) -> Option<Self> {
        let index = digit.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn digit(self) -> char {
        match self {
            SortColumn::Name => '1',
            SortColumn::Files => '2',
            SortColumn::Blank => '3',
            SortColumn::Comment => '4',
            SortColumn::Code => '5',
            SortColumn::Total => '6',
        }
    }

    /// Text columns start ascending, numeric columns descending.
    pub fn default_ascending(self) -> bool {
        matches!(self, SortColumn::Name)
    }
}

/// Which column a table is ordered by, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: SortColumn,
    pub ascending: bool,
}

impl Default for SortSpec {
    /// Largest code count first.
    fn default() -> Self {
        Self::new(SortColumn::Code)
    }
}

impl SortSpec {
    pub fn new(column: SortColumn) -> Self {
        Self {
            column,
            ascending: column.default_ascending(),
        }
    }

    /// The spec after the user picks `column`: the same column flips
    /// direction, a different one starts at its default direction.
    pub fn toggled(self, column: SortColumn) -> Self {
        if self.column == column {
            Self {
                column,
                ascending: !self.ascending,
            }
        } else {
            Self::new(column)
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        if self.ascending { ord } else { ord.reverse() }
    }
}

// ─── Row keys ─────────────────────────────────────────────────────────────────

/// Anything that can be a row in a sorted table.
pub trait Sortable {
    fn name_key(&self) -> &str;
    /// `None` for columns the row has no value for.
    fn numeric_key(&self, column: SortColumn) -> Option<u64>;
}

impl Sortable for LanguageStat {
    fn name_key(&self) -> &str {
        &self.name
    }

    fn numeric_key(&self, column: SortColumn) -> Option<u64> {
        match column {
            SortColumn::Name => None,
            SortColumn::Files => Some(self.file_count),
            SortColumn::Blank => Some(self.blank),
            SortColumn::Comment => Some(self.comment),
            SortColumn::Code => Some(self.code),
            SortColumn::Total => Some(self.total()),
        }
    }
}

impl Sortable for FileStat {
    fn name_key(&self) -> &str {
        &self.path
    }

    fn numeric_key(&self, column: SortColumn) -> Option<u64> {
        match column {
            SortColumn::Name | SortColumn::Files => None,
            SortColumn::Blank => Some(self.blank),
            SortColumn::Comment => Some(self.comment),
            SortColumn::Code => Some(self.code),
            SortColumn::Total => Some(self.total()),
        }
    }
}

/// Compares two rows under `spec`. Rows without a value for the column
/// compare equal, which leaves them in their current order.
pub fn compare<T: Sortable>(a: &T, b: &T, spec: SortSpec) -> Ordering {
    let ord = match spec.column {
        SortColumn::Name => fold_case(a.name_key()).cmp(fold_case(b.name_key())),
        column => a.numeric_key(column).cmp(&b.numeric_key(column)),
    };
    spec.apply(ord)
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Reorders the language table in place.
pub fn sort_languages(languages: &mut [LanguageStat], spec: SortSpec) {
    languages.sort_by(|a, b| compare(a, b, spec));
}

/// Returns the files of one language in display order without touching the
/// stored group.
///
/// Runs on every frame, so path keys are lowercased once per file rather
/// than once per comparison.
pub fn sorted_files(files: &[FileStat], spec: SortSpec) -> Vec<&FileStat> {
    let mut rows: Vec<&FileStat> = files.iter().collect();
    match (spec.column, spec.ascending) {
        (SortColumn::Name, true) => rows.sort_by_cached_key(|f| folded(&f.path)),
        (SortColumn::Name, false) => rows.sort_by_cached_key(|f| Reverse(folded(&f.path))),
        _ => rows.sort_by(|a, b| compare(*a, *b, spec)),
    }
    rows
}

/// Case-insensitive view of `s`, compared without allocating.
fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

fn folded(s: &str) -> String {
    fold_case(s).collect()
}
