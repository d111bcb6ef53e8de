//! # Table geometry
//!
//! Turns the terminal size into everything the renderer needs to know about
//! space: how many data rows fit on screen and how wide each column is.
//!
//! A [`TableLayout`] is always computed from scratch for a given size. It is
//! never patched, so a resize can't leave stale widths behind.
//!
//! ## Vertical budget
//!
//! ```text
//!  padding                 1
//!  title + gap             2
//!  table border + header   3
//!  ── data rows ──         visible_rows
//!  table border            1
//!  gap + status bar        2
//!  help line + padding     3
//! ```

/// Lines used by everything that isn't a data row.
pub const RESERVED_LINES: u16 = 12;

/// Horizontal padding around the content, both sides together.
pub const HORIZONTAL_PADDING: usize = 4;

/// Left and right border of the table box.
pub const TABLE_BORDER: usize = 2;

pub const MIN_NAME_WIDTH: usize = 20;
pub const MIN_FILES_WIDTH: usize = 8;
pub const MIN_BLANK_WIDTH: usize = 8;
pub const MIN_COMMENT_WIDTH: usize = 10;
pub const MIN_CODE_WIDTH: usize = 10;

/// Cursor marker, colour badge and a space in front of the language name.
pub const ROW_PREFIX_WIDTH: usize = 3;

/// One space between each pair of language columns.
const LANGUAGE_SEPARATORS: usize = 5;

/// Width of each numeric column in the file table.
pub const FILE_NUMBER_WIDTH: usize = 10;

/// Four numeric columns plus their separators.
pub const FILE_NUMBERS_TOTAL: usize = 4 * FILE_NUMBER_WIDTH + 4;

/// The path column never shrinks below this, even if that means overflowing.
pub const MIN_PATH_WIDTH: usize = 40;

/// Column widths of the language table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageColumns {
    pub name: usize,
    pub files: usize,
    pub blank: usize,
    pub comment: usize,
    pub code: usize,
    pub total: usize,
}

impl LanguageColumns {
    pub const MIN: LanguageColumns = LanguageColumns {
        name: MIN_NAME_WIDTH,
        files: MIN_FILES_WIDTH,
        blank: MIN_BLANK_WIDTH,
        comment: MIN_COMMENT_WIDTH,
        code: MIN_CODE_WIDTH,
        total: MIN_CODE_WIDTH,
    };

    /// Cells a full row takes, prefix and separators included.
    pub fn row_width(&self) -> usize {
        ROW_PREFIX_WIDTH
            + self.name
            + self.files
            + self.blank
            + self.comment
            + self.code
            + self.total
            + LANGUAGE_SEPARATORS
    }

    /// Spreads the room left after the minimum row over the columns.
    ///
    /// Half of the spare goes to the name; the other half is shared 20/20/30/30
    /// by files, blank, comment and code. The total column mirrors the code
    /// column and takes its growth out of the same spare, so the spare is
    /// scaled by 100/115 first and the name absorbs whatever rounding leaves.
    /// The row then fills `inner_width` exactly.
    fn for_width(inner_width: usize) -> Self {
        let spare = inner_width.saturating_sub(Self::MIN.row_width());
        if spare == 0 {
            return Self::MIN;
        }

        let split = spare * 100 / 115;
        let rest = split - split / 2;
        let files = rest * 20 / 100;
        let blank = rest * 20 / 100;
        let comment = rest * 30 / 100;
        let code = rest * 30 / 100;
        let numbers = files + blank + comment + 2 * code;

        Self {
            name: MIN_NAME_WIDTH + spare.saturating_sub(numbers),
            files: MIN_FILES_WIDTH + files,
            blank: MIN_BLANK_WIDTH + blank,
            comment: MIN_COMMENT_WIDTH + comment,
            code: MIN_CODE_WIDTH + code,
            total: MIN_CODE_WIDTH + code,
        }
    }
}

/// Column widths of the file table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileColumns {
    /// Includes the two-cell cursor marker.
    pub path: usize,
    pub number: usize,
}

impl FileColumns {
    fn for_width(inner_width: usize) -> Self {
        Self {
            path: inner_width
                .saturating_sub(FILE_NUMBERS_TOTAL)
                .max(MIN_PATH_WIDTH),
            number: FILE_NUMBER_WIDTH,
        }
    }
}

/// Everything size-dependent about the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub width: u16,
    pub height: u16,
    pub content_width: usize,
    /// Width inside the table box's borders.
    pub inner_width: usize,
    pub visible_rows: usize,
    pub languages: LanguageColumns,
    pub files: FileColumns,
}

impl Default for TableLayout {
    /// The classic 80×24 terminal, used until the first size is known.
    fn default() -> Self {
        Self::compute(80, 24)
    }
}

impl TableLayout {
    pub fn compute(width: u16, height: u16) -> Self {
        let content_width = (width as usize).saturating_sub(HORIZONTAL_PADDING);
        let inner_width = content_width.saturating_sub(TABLE_BORDER);
        let visible_rows = height.saturating_sub(RESERVED_LINES).max(1) as usize;
        Self {
            width,
            height,
            content_width,
            inner_width,
            visible_rows,
            languages: LanguageColumns::for_width(inner_width),
            files: FileColumns::for_width(inner_width),
        }
    }
}
