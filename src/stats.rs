//! # Analysis results
//!
//! The counting backend produces two JSON reports for the same target: one
//! aggregated by language and one broken down by file. [`ResultSet::from_reports`]
//! merges them into the single value the dashboard works with.
//!
//! Both reports are JSON objects keyed by language name (or file path). Each
//! also carries a `header` entry with run metadata and a `SUM` entry with the
//! grand total:
//!
//! ```text
//! { "header": {...},
//!   "Rust":   { "nFiles": 3, "blank": 10, "comment": 4, "code": 120 },
//!   "SUM":    { "nFiles": 3, "blank": 10, "comment": 4, "code": 120 } }
//! ```
//!
//! ## Partial failure
//!
//! A record that does not match the schema is logged and skipped. One bad
//! entry never costs the rest of the report. The grand total is recomputed
//! from the languages that were actually kept, so it always agrees with the
//! rows on screen.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GlocError, Result};

/// Name of the pseudo-entry holding the grand total.
pub const TOTAL_KEY: &str = "SUM";

/// Name of the pseudo-entry holding run metadata.
const HEADER_KEY: &str = "header";

// ─── Data types ───────────────────────────────────────────────────────────────

/// Line counts for one language.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LanguageStat {
    pub name: String,
    pub file_count: u64,
    pub blank: u64,
    pub comment: u64,
    pub code: u64,
}

impl LanguageStat {
    pub fn total(&self) -> u64 {
        self.blank + self.comment + self.code
    }
}

/// Line counts for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub path: String,
    pub language: String,
    pub blank: u64,
    pub comment: u64,
    pub code: u64,
}

impl FileStat {
    pub fn total(&self) -> u64 {
        self.blank + self.comment + self.code
    }
}

/// The merged output of one analysis run.
///
/// Built once, in full, by [`ResultSet::from_reports`]. The dashboard only
/// ever reorders `languages` afterwards; the per-file groups are read through
/// sorted views and never rearranged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultSet {
    pub languages: Vec<LanguageStat>,
    pub files_by_language: HashMap<String, Vec<FileStat>>,
    pub total: LanguageStat,
}

// ─── Raw report records ───────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawLanguage {
    #[serde(rename = "nFiles")]
    files: u64,
    blank: u64,
    comment: u64,
    code: u64,
}

#[derive(Deserialize)]
struct RawFile {
    blank: u64,
    comment: u64,
    code: u64,
    language: String,
}

// ─── Merge ────────────────────────────────────────────────────────────────────

impl ResultSet {
    /// Merges the by-language and by-file reports of `program` into one set.
    ///
    /// Fails only when a report as a whole is empty or not a JSON object.
    /// Files reported under a language that the aggregate report does not
    /// list are dropped so every file group has a matching language row.
    pub fn from_reports(program: &str, by_language: &str, by_file: &str) -> Result<Self> {
        let language_report = parse_report(program, "by-language", by_language)?;
        let file_report = parse_report(program, "by-file", by_file)?;

        let mut languages = Vec::new();
        let mut reported_total = None;
        for (key, value) in language_report {
            if key == HEADER_KEY {
                continue;
            }
            match language_record(&key, value) {
                Ok(stat) if key == TOTAL_KEY => reported_total = Some(stat),
                Ok(stat) => languages.push(stat),
                Err(err) => warn!(%err, "skipping record"),
            }
        }

        let mut files_by_language: HashMap<String, Vec<FileStat>> = HashMap::new();
        for (key, value) in file_report {
            if key == HEADER_KEY || key == TOTAL_KEY {
                continue;
            }
            match file_record(&key, value) {
                Ok(file) => {
                    if languages.iter().any(|l| l.name == file.language) {
                        files_by_language
                            .entry(file.language.clone())
                            .or_default()
                            .push(file);
                    } else {
                        warn!(path = %file.path, language = %file.language, "file has no language row, skipping");
                    }
                }
                Err(err) => warn!(%err, "skipping record"),
            }
        }

        let total = sum_languages(&languages);
        if let Some(reported) = reported_total {
            if reported != total {
                debug!(
                    reported_code = reported.code,
                    merged_code = total.code,
                    "reported total differs from merged languages"
                );
            }
        }

        Ok(Self {
            languages,
            files_by_language,
            total,
        })
    }

    /// The files counted for `language`, in path order. Reports are parsed
    /// into sorted maps, so the original key order is not kept.
    pub fn files(&self, language: &str) -> &[FileStat] {
        self.files_by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn file_count(&self) -> usize {
        self.files_by_language.values().map(Vec::len).sum()
    }
}

fn parse_report(program: &str, report: &str, text: &str) -> Result<Map<String, Value>> {
    if text.trim().is_empty() {
        return Err(GlocError::backend(program, format!("{report} report was empty")));
    }
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(GlocError::backend(
            program,
            format!("{report} report is not a JSON object"),
        )),
        Err(e) => Err(GlocError::backend(
            program,
            format!("could not parse {report} report: {e}"),
        )),
    }
}

fn language_record(key: &str, value: Value) -> Result<LanguageStat> {
    let raw: RawLanguage =
        serde_json::from_value(value).map_err(|e| GlocError::MalformedRecord {
            report: "by-language",
            key: key.to_string(),
            details: e.to_string(),
        })?;
    Ok(LanguageStat {
        name: key.to_string(),
        file_count: raw.files,
        blank: raw.blank,
        comment: raw.comment,
        code: raw.code,
    })
}

fn file_record(key: &str, value: Value) -> Result<FileStat> {
    let raw: RawFile = serde_json::from_value(value).map_err(|e| GlocError::MalformedRecord {
        report: "by-file",
        key: key.to_string(),
        details: e.to_string(),
    })?;
    Ok(FileStat {
        path: key.to_string(),
        language: raw.language,
        blank: raw.blank,
        comment: raw.comment,
        code: raw.code,
    })
}

/// Adds up every language into the `SUM` row.
pub fn sum_languages(languages: &[LanguageStat]) -> LanguageStat {
    languages.iter().fold(
        LanguageStat {
            name: TOTAL_KEY.to_string(),
            ..LanguageStat::default()
        },
        |mut acc, l| {
            acc.file_count += l.file_count;
            acc.blank += l.blank;
            acc.comment += l.comment;
            acc.code += l.code;
            acc
        },
    )
}
