//! # Command line
//!
//! Everything the user can configure comes from the command line or its
//! environment-variable fallbacks. [`Cli::request`] turns the raw arguments
//! into the [`AnalysisRequest`] the dashboard hands to the backend, and
//! rejects targets that don't exist before the terminal is touched.

use std::{
    env,
    path::{Path, PathBuf},
};

use clap::Parser;

use crate::{
    backend::{AnalysisMode, AnalysisRequest, is_revision_ref},
    error::{GlocError, Result},
};

/// gloc — browse cloc line counts by language and by file
#[derive(Debug, Parser)]
#[command(name = "gloc", version, about)]
pub struct Cli {
    /// Directory to analyse. A commit hash that is not an existing path is
    /// treated as `--rev <HASH>` for the current directory.
    #[arg(default_value = ".")]
    pub target: String,

    /// Count the files of this git revision instead of the working tree.
    #[arg(long, value_name = "REF")]
    pub rev: Option<String>,

    /// Line-counting program to run.
    #[arg(long, value_name = "PROGRAM", env = "GLOC_CLOC", default_value = "cloc")]
    pub cloc: String,

    /// Write diagnostics to this file. Verbosity is read from `GLOC_LOG`.
    #[arg(long, value_name = "PATH", env = "GLOC_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn request(&self) -> Result<AnalysisRequest> {
        let cwd = env::current_dir()?;
        self.request_in(&cwd)
    }

    /// Resolves the request as if the process were started in `cwd`.
    pub fn request_in(&self, cwd: &Path) -> Result<AnalysisRequest> {
        let path = cwd.join(expand_home(&self.target));

        let (target, mode) = match &self.rev {
            Some(rev) => (path, AnalysisMode::Revision(rev.clone())),
            None if !path.exists() && is_revision_ref(&self.target) => (
                cwd.to_path_buf(),
                AnalysisMode::Revision(self.target.clone()),
            ),
            None => (path, AnalysisMode::Plain),
        };

        if !target.exists() {
            return Err(GlocError::MissingTarget { path: target });
        }
        Ok(AnalysisRequest {
            target: normalize(&target),
            mode,
        })
    }
}

/// Replaces a leading `~` with the user's home directory.
fn expand_home(input: &str) -> PathBuf {
    let rest = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(input),
    };
    let home = env::var_os("HOME").or_else(|| env::var_os("USERPROFILE"));
    match home {
        Some(home) => PathBuf::from(home).join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(input),
    }
}

/// Canonical form of an existing path, or the path unchanged if that fails.
fn normalize(path: &Path) -> PathBuf {
    dunce_canonical(path).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(windows)]
fn dunce_canonical(path: &Path) -> Option<PathBuf> {
    // Avoid `\\?\` verbatim prefixes, which cloc does not understand.
    let canonical = path.canonicalize().ok()?;
    let plain = canonical
        .to_str()
        .and_then(|text| text.strip_prefix(r"\\?\"))
        .map(PathBuf::from);
    Some(plain.unwrap_or(canonical))
}

#[cfg(not(windows))]
fn dunce_canonical(path: &Path) -> Option<PathBuf> {
    path.canonicalize().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gloc").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_the_current_directory() {
        let cli = parse(&[]);
        assert_eq!(cli.target, ".");
        assert!(cli.rev.is_none());

        let dir = tempfile::tempdir().unwrap();
        let request = cli.request_in(dir.path()).unwrap();
        assert_eq!(request.mode, AnalysisMode::Plain);
        assert_eq!(request.target, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn relative_targets_resolve_against_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();

        let request = parse(&["src"]).request_in(dir.path()).unwrap();
        assert_eq!(request.target, dir.path().join("src").canonicalize().unwrap());
    }

    #[test]
    fn missing_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse(&["nope"]).request_in(dir.path()).unwrap_err();
        assert!(matches!(err, GlocError::MissingTarget { .. }));
    }

    #[test]
    fn commit_hash_target_becomes_a_revision_of_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let request = parse(&["4f2a9c1"]).request_in(dir.path()).unwrap();

        assert_eq!(request.mode, AnalysisMode::Revision("4f2a9c1".to_string()));
        assert_eq!(request.target, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn existing_directory_named_like_a_hash_is_a_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("deadbeef")).unwrap();

        let request = parse(&["deadbeef"]).request_in(dir.path()).unwrap();
        assert_eq!(request.mode, AnalysisMode::Plain);
    }

    #[test]
    fn explicit_rev_flag() {
        let dir = tempfile::tempdir().unwrap();
        let request = parse(&["--rev", "main", "."]).request_in(dir.path()).unwrap();
        assert_eq!(request.mode, AnalysisMode::Revision("main".to_string()));
    }

    #[test]
    fn backend_program_and_log_file_options() {
        let cli = parse(&["--cloc", "/opt/cloc/bin/cloc", "--log-file", "/tmp/gloc.log"]);
        assert_eq!(cli.cloc, "/opt/cloc/bin/cloc");
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/gloc.log")));
    }

    #[test]
    fn tilde_is_left_alone_inside_names() {
        assert_eq!(expand_home("~bob/src"), PathBuf::from("~bob/src"));
        assert_eq!(expand_home("src/~x"), PathBuf::from("src/~x"));
    }
}
