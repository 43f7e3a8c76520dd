//! Input records: parsing, validation, and batching.
//!
//! People arrive as a JSON array of mappings or a CSV file with a header
//! row; both deserialize into [`PersonRecord`] and validate into [`Person`].
//!
//! ## Validation Rules
//!
//! - `name`: required, non-empty after trimming
//! - `image_path`: required, non-empty
//! - `dob`: optional ISO date (`YYYY-MM-DD`), used only by [`due_today`]
//!
//! A single invalid record rejects the **entire** input: the error lists
//! every offending record, and nothing is rendered. Photo paths are checked
//! eagerly with [`check_photos`] before any rendering starts, so a missing
//! file fails fast instead of aborting mid-render.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported input format: {0} (expected .json or .csv)")]
    UnsupportedFormat(PathBuf),
    #[error("invalid input data: {}", join_issues(.0))]
    Invalid(Vec<RecordIssue>),
    #[error("photo files not found: {}", join_paths(.0))]
    MissingPhotos(Vec<PathBuf>),
}

/// One problem with one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    /// Zero-based position in the input sequence.
    pub index: usize,
    pub reason: String,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: {}", self.index, self.reason)
    }
}

fn join_issues(issues: &[RecordIssue]) -> String {
    issues
        .iter()
        .map(RecordIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A raw input record as it appears in the JSON/CSV source.
///
/// Required fields are `Option` so that presence is checked by [`validate`]
/// (which reports every missing field across the whole input) instead of
/// failing on the first record during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PersonRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
}

/// A validated person, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub name: String,
    pub image_path: PathBuf,
    pub dob: Option<NaiveDate>,
}

/// Read records from a `.json` or `.csv` file, selected by extension.
pub fn read_records(path: &Path) -> Result<Vec<PersonRecord>, InputError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "json" => read_json(path),
        "csv" => read_csv(path),
        _ => Err(InputError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn read_json(path: &Path) -> Result<Vec<PersonRecord>, InputError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_csv(path: &Path) -> Result<Vec<PersonRecord>, InputError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

/// Validate raw records into [`Person`]s.
///
/// All records are checked; any failure rejects the whole input with every
/// issue listed. Logs the outcome either way.
pub fn validate(records: &[PersonRecord]) -> Result<Vec<Person>, InputError> {
    let mut people = Vec::with_capacity(records.len());
    let mut issues = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let issues_before = issues.len();
        let name = record.name.as_deref().map(str::trim).unwrap_or("");
        if name.is_empty() {
            issues.push(RecordIssue {
                index,
                reason: "missing or empty name".into(),
            });
        }
        let image_path = record.image_path.as_deref().unwrap_or("");
        if image_path.is_empty() {
            issues.push(RecordIssue {
                index,
                reason: "missing or empty image_path".into(),
            });
        }
        if issues.len() == issues_before {
            people.push(Person {
                name: name.to_string(),
                image_path: PathBuf::from(image_path),
                dob: record.dob,
            });
        }
    }

    if issues.is_empty() {
        info!(count = people.len(), "validated input records");
        Ok(people)
    } else {
        error!(issues = issues.len(), "rejected input records");
        Err(InputError::Invalid(issues))
    }
}

/// Verify every photo path points at an existing file.
///
/// Called before any template is opened so a missing photo cannot abort the
/// run after some posts were already written.
pub fn check_photos(people: &[Person]) -> Result<(), InputError> {
    let missing: Vec<PathBuf> = people
        .iter()
        .map(|p| p.image_path.clone())
        .filter(|path| !path.is_file())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingPhotos(missing))
    }
}

/// Split validated people into consecutive per-post chunks.
///
/// Input order is preserved; the last chunk may be shorter.
pub fn chunk_people(people: &[Person], max_per_post: u32) -> Vec<&[Person]> {
    people.chunks(max_per_post.max(1) as usize).collect()
}

/// Keep only people whose birthday falls on `today`.
///
/// People without a recorded date of birth are always kept; the year is
/// ignored, only month and day are compared.
pub fn due_today(people: Vec<Person>, today: NaiveDate) -> Vec<Person> {
    people
        .into_iter()
        .filter(|p| {
            p.dob
                .is_none_or(|dob| dob.month() == today.month() && dob.day() == today.day())
        })
        .collect()
}
