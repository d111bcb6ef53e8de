//! # Navigation state
//!
//! Each table keeps its own [`Cursor`]: the highlighted row plus the first
//! row of the scroll window. Every navigation command funnels through
//! [`Cursor::move_to`], which clamps the index and scrolls as little as
//! possible to keep it on screen.
//!
//! ```text
//!   offset ──► ┌──────────────┐
//!              │ row          │
//!   index  ──► │ row  ◄ cursor│  visible_rows
//!              │ row          │
//!              └──────────────┘
//! ```
//!
//! After every move `offset <= index < offset + visible_rows` holds and
//! `index < rows` unless the table is empty, in which case both are 0.

/// Which table is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Languages,
    Files,
}

/// Highlighted row and scroll position of one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub index: usize,
    pub offset: usize,
}

impl Cursor {
    /// Moves to `target`, clamped to the table, scrolling only when the row
    /// would otherwise be outside the window.
    pub fn move_to(&mut self, target: usize, rows: usize, visible_rows: usize) {
        if rows == 0 {
            *self = Self::default();
            return;
        }
        let visible_rows = visible_rows.max(1);
        self.index = target.min(rows - 1);
        if self.index < self.offset {
            self.offset = self.index;
        } else if self.index >= self.offset + visible_rows {
            self.offset = self.index + 1 - visible_rows;
        }
    }

    pub fn up(&mut self, rows: usize, visible_rows: usize) {
        self.move_to(self.index.saturating_sub(1), rows, visible_rows);
    }

    pub fn down(&mut self, rows: usize, visible_rows: usize) {
        self.move_to(self.index.saturating_add(1), rows, visible_rows);
    }

    pub fn home(&mut self, rows: usize, visible_rows: usize) {
        self.move_to(0, rows, visible_rows);
    }

    pub fn end(&mut self, rows: usize, visible_rows: usize) {
        self.move_to(rows.saturating_sub(1), rows, visible_rows);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// First row to draw for a window of `visible_rows`.
    ///
    /// Equal to `offset` unless the window shrank since the last move, in
    /// which case the window is slid down just far enough to show the cursor.
    /// Does not modify the cursor.
    pub fn window_start(&self, visible_rows: usize) -> usize {
        let visible_rows = visible_rows.max(1);
        if self.index >= self.offset + visible_rows {
            self.index + 1 - visible_rows
        } else {
            self.offset
        }
    }
}

/// Where the user is in the dashboard.
///
/// The two cursors are independent: drilling into a language and coming back
/// leaves the language cursor exactly where it was.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub mode: Mode,
    pub selected_language: Option<String>,
    pub languages: Cursor,
    pub files: Cursor,
}

impl ViewState {
    /// The cursor of the table currently on screen.
    pub fn active_cursor(&mut self) -> &mut Cursor {
        match self.mode {
            Mode::Languages => &mut self.languages,
            Mode::Files => &mut self.files,
        }
    }

    pub fn enter_files(&mut self, language: String) {
        self.selected_language = Some(language);
        self.files.reset();
        self.mode = Mode::Files;
    }

    pub fn back_to_languages(&mut self) {
        self.mode = Mode::Languages;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_scrolls_only_past_the_window() {
        let mut c = Cursor::default();
        for _ in 0..4 {
            c.down(10, 5);
        }
        assert_eq!(c, Cursor { index: 4, offset: 0 });

        c.down(10, 5);
        assert_eq!(c, Cursor { index: 5, offset: 1 });
    }

    #[test]
    fn up_scrolls_only_past_the_window() {
        let mut c = Cursor { index: 9, offset: 5 };
        c.up(10, 5);
        assert_eq!(c, Cursor { index: 8, offset: 5 });

        c.move_to(5, 10, 5);
        c.up(10, 5);
        assert_eq!(c, Cursor { index: 4, offset: 4 });
    }

    #[test]
    fn movement_is_clamped_at_both_ends() {
        let mut c = Cursor::default();
        c.up(3, 5);
        assert_eq!(c, Cursor::default());

        c.end(3, 5);
        c.down(3, 5);
        assert_eq!(c.index, 2);
    }

    #[test]
    fn end_and_home_jump_through_the_same_clamp() {
        let mut c = Cursor::default();
        c.end(100, 10);
        assert_eq!(c, Cursor { index: 99, offset: 90 });

        c.home(100, 10);
        assert_eq!(c, Cursor { index: 0, offset: 0 });
    }

    #[test]
    fn empty_table_pins_the_cursor_at_zero() {
        let mut c = Cursor { index: 4, offset: 2 };
        c.down(0, 5);
        assert_eq!(c, Cursor::default());
        c.end(0, 5);
        assert_eq!(c, Cursor::default());
    }

    #[test]
    fn window_start_follows_a_shrunken_window() {
        let c = Cursor { index: 9, offset: 0 };
        assert_eq!(c.window_start(20), 0);
        assert_eq!(c.window_start(5), 5);
        assert_eq!(c.window_start(0), 9);
    }

    #[test]
    fn entering_files_resets_only_the_file_cursor() {
        let mut view = ViewState {
            languages: Cursor { index: 7, offset: 3 },
            files: Cursor { index: 12, offset: 10 },
            ..ViewState::default()
        };
        view.enter_files("Go".to_string());

        assert_eq!(view.mode, Mode::Files);
        assert_eq!(view.selected_language.as_deref(), Some("Go"));
        assert_eq!(view.files, Cursor::default());
        assert_eq!(view.languages, Cursor { index: 7, offset: 3 });

        view.back_to_languages();
        assert_eq!(view.mode, Mode::Languages);
        assert_eq!(view.languages, Cursor { index: 7, offset: 3 });
    }
}
