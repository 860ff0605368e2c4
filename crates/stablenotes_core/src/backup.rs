//! JSON backup export and import.
//!
//! # Responsibility
//! - Serialize the full state into a downloadable, date-named backup file.
//! - Validate incoming backup files into typed collections before any state
//!   is touched.
//!
//! # Invariants
//! - The backup shape is a top-level object with array-typed `notes` and
//!   `categories`; anything else is rejected with a typed error.
//! - Parsing never mutates application state; callers replace state only on
//!   success.

use crate::model::category::Category;
use crate::model::note::Note;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BackupResult<T> = Result<T, BackupError>;

/// Backup export/import error.
#[derive(Debug)]
pub enum BackupError {
    /// Nothing to export: both collections are empty.
    NoData,
    /// Input is not valid JSON at all.
    Json(serde_json::Error),
    /// Parsed JSON does not have the required backup shape.
    InvalidShape(&'static str),
    /// Shape was right but a record failed to decode.
    Decode(serde_json::Error),
}

impl Display for BackupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => write!(f, "nothing to export: there are no notes or categories"),
            Self::Json(err) => write!(f, "backup file is not valid JSON: {err}"),
            Self::InvalidShape(details) => write!(f, "invalid backup file format: {details}"),
            Self::Decode(err) => write!(f, "backup record failed to decode: {err}"),
        }
    }
}

impl Error for BackupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) | Self::Decode(err) => Some(err),
            Self::NoData | Self::InvalidShape(_) => None,
        }
    }
}

/// Full-state backup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    pub notes: Vec<Note>,
    pub categories: Vec<Category>,
}

/// A ready-to-download backup: file name plus pretty-printed JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub json: String,
}

/// Backup file name for the given date: `notes-backup-<YYYY-MM-DD>.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("notes-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Serializes the full state into a downloadable backup.
pub fn export(
    notes: &[Note],
    categories: &[Category],
    date: NaiveDate,
) -> BackupResult<BackupFile> {
    if notes.is_empty() && categories.is_empty() {
        return Err(BackupError::NoData);
    }

    let backup = Backup {
        notes: notes.to_vec(),
        categories: categories.to_vec(),
    };
    let json = serde_json::to_string_pretty(&backup).map_err(BackupError::Json)?;
    Ok(BackupFile {
        file_name: backup_file_name(date),
        json,
    })
}

/// Validates and parses backup file contents.
///
/// The shape check runs before record decoding so that structural problems
/// are reported as [`BackupError::InvalidShape`] rather than as opaque
/// decode failures.
pub fn parse(raw: &str) -> BackupResult<Backup> {
    let value: Value = serde_json::from_str(raw).map_err(BackupError::Json)?;
    let object = value
        .as_object()
        .ok_or(BackupError::InvalidShape("top-level value must be an object"))?;

    ensure_array(object, "notes", "`notes` must be present and an array")?;
    ensure_array(
        object,
        "categories",
        "`categories` must be present and an array",
    )?;

    serde_json::from_value(value).map_err(BackupError::Decode)
}

fn ensure_array(
    object: &serde_json::Map<String, Value>,
    key: &str,
    message: &'static str,
) -> BackupResult<()> {
    if object.get(key).is_some_and(Value::is_array) {
        Ok(())
    } else {
        Err(BackupError::InvalidShape(message))
    }
}
