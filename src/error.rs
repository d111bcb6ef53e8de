//! # Errors
//!
//! Every failure the dashboard can report flows through [`GlocError`].
//! [`GlocError::BackendUnavailable`] and [`GlocError::MissingTarget`] are
//! printed by the bootstrap code before the terminal is taken over, and
//! [`GlocError::Backend`] is shown on the dashboard's error screen.
//! [`GlocError::MalformedRecord`] is produced while merging reports and is
//! logged and skipped rather than returned.

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, GlocError>;

#[derive(Debug, Error)]
pub enum GlocError {
    /// The counting program could not be found or started.
    #[error("'{program}' is not installed or could not be started")]
    BackendUnavailable { program: String },

    /// The counting program ran but its output was unusable.
    #[error("{program} failed: {details}")]
    Backend { program: String, details: String },

    /// One entry of a report did not match the expected schema.
    #[error("malformed {report} record '{key}': {details}")]
    MalformedRecord {
        report: &'static str,
        key: String,
        details: String,
    },

    /// The analysis target does not exist.
    #[error("path does not exist: {}", path.display())]
    MissingTarget { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GlocError {
    pub fn backend(program: &str, details: impl Into<String>) -> Self {
        Self::Backend {
            program: program.to_string(),
            details: details.into(),
        }
    }
}
