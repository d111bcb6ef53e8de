//! # Background analysis
//!
//! Line counting is delegated to `cloc`. This module knows how to invoke it
//! and how to run that invocation without freezing the UI.
//!
//! ## How it works
//!
//! [`start_analysis`] spawns a single background thread that runs the
//! [`Backend`] once and sends exactly one [`AnalysisDone`] over an
//! [`std::sync::mpsc`] channel. The main thread drains the channel on every
//! event-loop tick without blocking (see
//! [`crate::app::App::process_analysis_messages`]), so the loading screen keeps
//! animating while `cloc` works.
//!
//! There is no cancellation and no retry. If the user quits early the thread
//! finishes its run, fails to send on the closed channel, and exits.
//!
//! ## Two reports
//!
//! [`ClocBackend`] runs `cloc` twice on the same target: once for the
//! by-language summary and once with `--by-file`. The two JSON documents are
//! merged by [`ResultSet::from_reports`].

use std::{
    any::Any,
    env,
    io::ErrorKind,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    process::Command,
    sync::mpsc::{self, Receiver, Sender},
    time::{Duration, Instant},
};

use tracing::{debug, error, info, warn};

use crate::{
    error::{GlocError, Result},
    stats::ResultSet,
};

// ─── Requests ─────────────────────────────────────────────────────────────────

/// What to count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisMode {
    /// The files currently on disk under the target.
    Plain,
    /// The files of a git revision of the repository at the target.
    Revision(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub target: PathBuf,
    pub mode: AnalysisMode,
}

/// Returns `true` if `input` looks like an abbreviated or full commit hash.
pub fn is_revision_ref(input: &str) -> bool {
    (7..=40).contains(&input.len()) && input.chars().all(|c| c.is_ascii_hexdigit())
}

// ─── Backends ─────────────────────────────────────────────────────────────────

/// Anything that can turn a request into a [`ResultSet`].
pub trait Backend: Send + 'static {
    fn name(&self) -> &str;
    fn analyze(&self, request: &AnalysisRequest) -> Result<ResultSet>;
}

/// Runs the `cloc` command-line tool.
#[derive(Debug, Clone)]
pub struct ClocBackend {
    program: String,
}

impl ClocBackend {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Finds the program on `PATH`, or checks it directly when it contains a
    /// path separator.
    pub fn locate(&self) -> Result<PathBuf> {
        let candidate = Path::new(&self.program);
        if candidate.components().count() > 1 {
            return if candidate.is_file() {
                Ok(candidate.to_path_buf())
            } else {
                Err(self.unavailable())
            };
        }

        let path = env::var_os("PATH").ok_or_else(|| self.unavailable())?;
        env::split_paths(&path)
            .flat_map(|dir| executable_names(&self.program).map(move |name| dir.join(name)))
            .find(|p| p.is_file())
            .ok_or_else(|| self.unavailable())
    }

    fn unavailable(&self) -> GlocError {
        GlocError::BackendUnavailable {
            program: self.program.clone(),
        }
    }

    fn arguments(request: &AnalysisRequest, by_file: bool) -> Vec<String> {
        let mut args = vec!["--json".to_string()];
        if by_file {
            args.push("--by-file".to_string());
        }
        match &request.mode {
            AnalysisMode::Plain => args.push(request.target.to_string_lossy().into_owned()),
            AnalysisMode::Revision(rev) => {
                args.push("--git".to_string());
                args.push(rev.clone());
            }
        }
        args
    }

    fn run(&self, request: &AnalysisRequest, by_file: bool) -> Result<String> {
        let args = Self::arguments(request, by_file);
        let mut cmd = Command::new(&self.program);
        cmd.args(&args);
        if let AnalysisMode::Revision(_) = request.mode {
            cmd.current_dir(&request.target);
        }
        debug!(program = %self.program, ?args, "running backend");

        let output = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => self.unavailable(),
            _ => GlocError::backend(&self.program, e.to_string()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let details = match stderr.trim() {
                "" => output.status.to_string(),
                msg => msg.to_string(),
            };
            return Err(GlocError::backend(&self.program, details));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| GlocError::backend(&self.program, "output is not valid UTF-8"))
    }
}

impl Backend for ClocBackend {
    fn name(&self) -> &str {
        &self.program
    }

    fn analyze(&self, request: &AnalysisRequest) -> Result<ResultSet> {
        let by_language = self.run(request, false)?;
        let by_file = self.run(request, true)?;
        ResultSet::from_reports(&self.program, &by_language, &by_file)
    }
}

#[cfg(windows)]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    ["", ".exe", ".bat", ".cmd"]
        .into_iter()
        .map(move |ext| format!("{program}{ext}"))
}

#[cfg(not(windows))]
fn executable_names(program: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(program.to_string())
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// The single message a background analysis sends back.
#[derive(Debug)]
pub struct AnalysisDone {
    pub result: Result<ResultSet>,
    pub elapsed: Duration,
}

/// Name of the background thread, so panic handling can tell it apart from
/// the UI thread.
pub const ANALYSIS_THREAD: &str = "gloc-analysis";

/// Starts `backend` on a background thread and returns the receiving end of
/// its channel immediately.
///
/// If the thread can't be started the sender is dropped, and the receiver
/// reports a disconnect instead of a message.
pub fn start_analysis<B: Backend>(backend: B, request: AnalysisRequest) -> Receiver<AnalysisDone> {
    let (tx, rx) = mpsc::channel::<AnalysisDone>();
    let spawned = std::thread::Builder::new()
        .name(ANALYSIS_THREAD.to_string())
        .spawn(move || analysis_thread(backend, request, tx));
    if let Err(err) = spawned {
        error!(%err, "could not start analysis thread");
    }
    rx
}

// ─── Background thread ────────────────────────────────────────────────────────

fn analysis_thread<B: Backend>(backend: B, request: AnalysisRequest, tx: Sender<AnalysisDone>) {
    info!(backend = backend.name(), target = %request.target.display(), mode = ?request.mode, "analysis started");
    let started = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(|| backend.analyze(&request)))
        .unwrap_or_else(|payload| {
            Err(GlocError::backend(
                backend.name(),
                format!("analysis panicked: {}", panic_message(&*payload)),
            ))
        });
    let elapsed = started.elapsed();

    match &result {
        Ok(rs) => info!(
            languages = rs.languages.len(),
            files = rs.file_count(),
            code = rs.total.code,
            ?elapsed,
            "analysis finished"
        ),
        Err(err) => warn!(%err, ?elapsed, "analysis failed"),
    }

    tx.send(AnalysisDone { result, elapsed }).ok();
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown cause"
    }
}
