//! # Application state
//!
//! [`App`] owns everything the UI reads and the event loop mutates: the
//! analysis result, which table is on screen, both cursors, both sort orders
//! and the current table geometry.
//!
//! ## How screens flow
//!
//! ```text
//!  Loading ──(result ok)──► Languages ──(Enter)──► Files
//!     │                         ▲                    │
//!     │                         └────(Esc / q)───────┘
//!     └──(result err)──► Failed
//! ```
//!
//! `Loading` and `Failed` only accept quit. `q` quits from the language table
//! and steps back from the file table; `Ctrl+C` quits from anywhere.
//!
//! ## Events
//!
//! State only changes in response to three kinds of event, handled one at a
//! time on the main thread:
//!
//! - a key, translated to a [`Command`] and applied by [`App::handle`];
//! - a terminal resize, applied by [`App::resize`], which touches nothing but
//!   the layout;
//! - the one [`AnalysisDone`] message from the background thread, picked up
//!   by [`App::process_analysis_messages`].

use std::{
    path::Path,
    sync::mpsc::{Receiver, TryRecvError},
    time::Duration,
};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use crate::{
    backend::{AnalysisDone, AnalysisMode, AnalysisRequest, Backend, start_analysis},
    layout::TableLayout,
    sort::{SortColumn, SortSpec, sort_languages, sorted_files},
    stats::{FileStat, LanguageStat, ResultSet},
    view::{Cursor, Mode, ViewState},
};

// ─── Commands ─────────────────────────────────────────────────────────────────

/// A user action, independent of which key produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Home,
    End,
    /// Drill into the highlighted language.
    Open,
    /// Leave the file table.
    Back,
    /// Back from the file table, quit from anywhere else.
    Quit,
    /// Quit from anywhere.
    ForceQuit,
    Sort(SortColumn),
}

impl Command {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Command::ForceQuit),
                _ => None,
            };
        }
        let cmd = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Command::Up,
            KeyCode::Down | KeyCode::Char('j') => Command::Down,
            KeyCode::Home | KeyCode::Char('g') => Command::Home,
            KeyCode::End | KeyCode::Char('G') => Command::End,
            KeyCode::Enter => Command::Open,
            KeyCode::Esc => Command::Back,
            KeyCode::Char('q') => Command::Quit,
            KeyCode::Char(c) => Command::Sort(SortColumn::from_digit(c)?),
            _ => return None,
        };
        Some(cmd)
    }
}

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

// ─── State ────────────────────────────────────────────────────────────────────

/// Shown when the background thread goes away without reporting back.
pub const ANALYSIS_LOST: &str = "analysis ended without a result";

/// Where the analysis is.
#[derive(Debug)]
pub enum Phase {
    /// Waiting for the background analysis.
    Loading,
    Ready(ResultSet),
    /// The analysis failed. Holds the message shown to the user.
    Failed(String),
}

pub struct App {
    pub request: AnalysisRequest,
    pub phase: Phase,
    pub view: ViewState,
    pub language_sort: SortSpec,
    pub file_sort: SortSpec,
    pub layout: TableLayout,

    /// How long the analysis took, once it has finished.
    pub elapsed: Option<Duration>,

    /// Receiving end of the analysis channel. `None` before the analysis
    /// starts and after its message has arrived.
    analysis_rx: Option<Receiver<AnalysisDone>>,

    /// Incremented on every event-loop iteration to drive the spinner.
    pub ticker: u64,
}

// ─── Construction ─────────────────────────────────────────────────────────────

impl App {
    pub fn new(request: AnalysisRequest, layout: TableLayout) -> Self {
        Self {
            request,
            phase: Phase::Loading,
            view: ViewState::default(),
            language_sort: SortSpec::default(),
            file_sort: SortSpec::default(),
            layout,
            elapsed: None,
            analysis_rx: None,
            ticker: 0,
        }
    }

    pub fn target(&self) -> &Path {
        &self.request.target
    }

    /// The git revision being counted, if any.
    pub fn revision(&self) -> Option<&str> {
        match &self.request.mode {
            AnalysisMode::Plain => None,
            AnalysisMode::Revision(rev) => Some(rev),
        }
    }
}

// ─── Analysis ─────────────────────────────────────────────────────────────────

impl App {
    /// Hands the request to `backend` on a background thread.
    pub fn begin_analysis<B: Backend>(&mut self, backend: B) {
        self.analysis_rx = Some(start_analysis(backend, self.request.clone()));
        self.phase = Phase::Loading;
    }

    /// Picks up the analysis result if it has arrived, without blocking.
    pub fn process_analysis_messages(&mut self) {
        let Some(rx) = &self.analysis_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(done) => {
                self.analysis_rx = None;
                self.install(done);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!("analysis thread ended without a result");
                self.analysis_rx = None;
                self.phase = Phase::Failed(ANALYSIS_LOST.to_string());
            }
        }
    }

    /// Applies the finished analysis.
    ///
    /// A successful result is sorted with the current language sort and shown
    /// in the language table; a failure moves to the error screen for good.
    pub fn install(&mut self, done: AnalysisDone) {
        self.elapsed = Some(done.elapsed);
        match done.result {
            Ok(mut result) => {
                sort_languages(&mut result.languages, self.language_sort);
                debug!(languages = result.languages.len(), "result installed");
                self.phase = Phase::Ready(result);
                self.layout = TableLayout::compute(self.layout.width, self.layout.height);
                self.view.mode = Mode::Languages;
            }
            Err(err) => {
                debug!(%err, "analysis failed, showing error screen");
                self.phase = Phase::Failed(err.to_string());
            }
        }
    }

    pub fn result(&self) -> Option<&ResultSet> {
        match &self.phase {
            Phase::Ready(result) => Some(result),
            _ => None,
        }
    }
}

// ─── Rows ─────────────────────────────────────────────────────────────────────

impl App {
    /// The language table in display order. Empty until a result arrives.
    pub fn language_rows(&self) -> &[LanguageStat] {
        match self.result() {
            Some(result) => &result.languages,
            None => &[],
        }
    }

    /// The file table of the selected language in display order.
    pub fn file_rows(&self) -> Vec<&FileStat> {
        match (self.result(), &self.view.selected_language) {
            (Some(result), Some(language)) => sorted_files(result.files(language), self.file_sort),
            _ => Vec::new(),
        }
    }

    /// Number of rows in the table on screen.
    pub fn row_count(&self) -> usize {
        match self.view.mode {
            Mode::Languages => self.language_rows().len(),
            Mode::Files => self.file_count(),
        }
    }

    /// Size of the file table, without sorting it.
    fn file_count(&self) -> usize {
        match (self.result(), &self.view.selected_language) {
            (Some(result), Some(language)) => result.files(language).len(),
            _ => 0,
        }
    }

    /// The cursor of the table on screen.
    pub fn cursor(&self) -> Cursor {
        match self.view.mode {
            Mode::Languages => self.view.languages,
            Mode::Files => self.view.files,
        }
    }
}

// ─── Events ───────────────────────────────────────────────────────────────────

impl App {
    /// Recomputes the layout for a new terminal size. Nothing else changes.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.layout = TableLayout::compute(width, height);
    }

    pub fn handle(&mut self, cmd: Command) -> Flow {
        if cmd == Command::ForceQuit {
            return Flow::Quit;
        }
        if !matches!(self.phase, Phase::Ready(_)) {
            return match cmd {
                Command::Quit => Flow::Quit,
                _ => Flow::Continue,
            };
        }

        match cmd {
            Command::Quit if self.view.mode == Mode::Languages => return Flow::Quit,
            Command::Quit | Command::Back => self.back(),
            Command::Open => self.open_selected(),
            Command::Up => self.navigate(Cursor::up),
            Command::Down => self.navigate(Cursor::down),
            Command::Home => self.navigate(Cursor::home),
            Command::End => self.navigate(Cursor::end),
            Command::Sort(column) => self.sort_by(column),
            Command::ForceQuit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn navigate(&mut self, step: fn(&mut Cursor, usize, usize)) {
        let rows = self.row_count();
        let visible_rows = self.layout.visible_rows;
        step(self.view.active_cursor(), rows, visible_rows);
    }

    fn open_selected(&mut self) {
        if self.view.mode != Mode::Languages {
            return;
        }
        let Some(language) = self.language_rows().get(self.view.languages.index) else {
            return;
        };
        let name = language.name.clone();
        debug!(language = %name, "entering file table");
        self.view.enter_files(name);
    }

    fn back(&mut self) {
        if self.view.mode == Mode::Files {
            debug!("back to language table");
            self.view.back_to_languages();
        }
    }

    fn sort_by(&mut self, column: SortColumn) {
        match self.view.mode {
            Mode::Languages => {
                self.language_sort = self.language_sort.toggled(column);
                if let Phase::Ready(result) = &mut self.phase {
                    sort_languages(&mut result.languages, self.language_sort);
                }
                self.view.languages.reset();
            }
            // Files have no file count of their own.
            Mode::Files if column == SortColumn::Files => {}
            Mode::Files => {
                self.file_sort = self.file_sort.toggled(column);
                self.view.files.reset();
            }
        }
    }
}
