//! # Entry point
//!
//! This is where the program starts. It does four things in order:
//!
//! 1. **Parse the command line** ([`cli::Cli`]) and check the target and the
//!    line counter exist, all before touching the terminal, so `--help` and
//!    startup errors print normally.
//!
//! 2. **Install logging** when a log file is configured. The TUI owns the
//!    screen, so diagnostics never go to stdout or stderr.
//!
//! 3. **Set up the terminal** for full-screen TUI mode: raw input, alternate
//!    screen buffer, hidden cursor.
//!
//! 4. **Run the event loop** ([`run`]), then unconditionally restore the
//!    terminal when the loop exits (whether normally or via panic).
//!
//! ## App lifecycle at a glance
//!
//! ```text
//! main()
//!  └─ run(terminal, app)
//!      └─ loop:
//!          ├─ drain the analysis channel      (cloc result arrives once)
//!          ├─ draw the current screen
//!          ├─ wait up to 80 ms for an event
//!          └─ key → Command → App::handle,  resize → App::resize
//! ```
//!
//! The 80 ms poll timeout keeps the spinner animation smooth even when the
//! user isn't pressing anything.

mod app;
mod backend;
mod cli;
mod error;
mod layout;
mod sort;
mod stats;
mod ui;
mod view;

#[cfg(test)]
mod test_properties;

use std::{
    fs::File,
    io::{self, Stdout},
    path::Path,
    process::ExitCode,
    sync::Mutex,
    time::Duration,
};

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        self, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use app::{App, Command, Flow};
use backend::{ANALYSIS_THREAD, ClocBackend};
use cli::Cli;
use layout::TableLayout;
use ui::palette::LinguistPalette;

/// Environment variable holding the log filter, e.g. `GLOC_LOG=debug`.
const LOG_ENV: &str = "GLOC_LOG";

/// The main event loop.
///
/// Each iteration:
///
/// 1. **Drains** the analysis channel so the result appears on the next
///    frame without a keypress.
/// 2. **Draws** the current state via [`ui::ui`].
/// 3. **Ticks** the spinner counter.
/// 4. **Polls for input** for up to 80 ms. Key presses become [`Command`]s,
///    resizes recompute the layout.
///
/// Returns `Ok(())` when the user quits, or bubbles up any I/O error.
fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        app.process_analysis_messages();

        terminal.draw(|f| ui::ui(f, app, &LinguistPalette))?;

        app.ticker = app.ticker.wrapping_add(1);

        if !event::poll(Duration::from_millis(80))? {
            continue;
        }

        match event::read()? {
            // Only key-down; release and repeat events are ignored.
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(command) = Command::from_key(key) else {
                    continue;
                };
                if app.handle(command) == Flow::Quit {
                    return Ok(());
                }
            }
            Event::Resize(width, height) => app.resize(width, height),
            _ => {}
        }
    }
}

/// Sends `tracing` output to `path`, filtered by [`LOG_ENV`] (default `info`).
fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Parses arguments, checks the environment, then hands the terminal to the
/// dashboard and restores it on exit.
///
/// Terminal setup and teardown live here so it's easy to reason about what
/// state the terminal is in at any point:
///
/// 1. Register a **panic hook** that restores the terminal before printing the
///    panic message; otherwise a crash leaves the shell in raw mode.
/// 2. Enable **raw mode** and push the **alternate screen buffer**.
/// 3. Run the event loop.
/// 4. **Always** pop the alternate screen and restore cooked mode, even if the
///    loop returned an error.
fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("gloc: cannot open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    let request = match cli.request() {
        Ok(request) => request,
        Err(err) => {
            eprintln!("gloc: {err}");
            return ExitCode::FAILURE;
        }
    };

    let backend = ClocBackend::new(cli.cloc.as_str());
    match backend.locate() {
        Ok(path) => info!(program = %path.display(), "found line counter"),
        Err(err) => {
            eprintln!("gloc: {err}");
            eprintln!();
            eprintln!("Install cloc and make sure it is on your PATH:");
            eprintln!("    brew install cloc      # macOS");
            eprintln!("    apt install cloc       # Debian / Ubuntu");
            eprintln!("or point --cloc / GLOC_CLOC at an existing binary.");
            return ExitCode::FAILURE;
        }
    }

    match start_dashboard(App::new(request, initial_layout()), backend) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "terminal error");
            eprintln!("gloc: {err}");
            ExitCode::FAILURE
        }
    }
}

/// The layout for the terminal as it is right now, or 80×24 if its size
/// can't be read.
fn initial_layout() -> TableLayout {
    match terminal::size() {
        Ok((width, height)) => TableLayout::compute(width, height),
        Err(_) => TableLayout::default(),
    }
}

fn start_dashboard(mut app: App, backend: ClocBackend) -> io::Result<()> {
    // A panic in the analysis thread is caught there and shown on the error
    // screen; only the UI thread may tear the terminal down.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if std::thread::current().name() == Some(ANALYSIS_THREAD) {
            error!(%info, "analysis thread panicked");
            return;
        }
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;

    // Started after the screen is up so the spinner is visible from the start.
    app.begin_analysis(backend);

    // Captured so the terminal is restored before an error is returned.
    let result = run(&mut terminal, &mut app);

    let _ = terminal.show_cursor();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}
