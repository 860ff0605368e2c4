//! Snapshot store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and reload the full note/category collections as JSON values
//!   under fixed keys, one store table per collection.
//!
//! # Invariants
//! - `load` on a fresh database returns empty collections, never an error.
//! - `save` overwrites whole snapshots; last write wins per store. The two
//!   stores are written independently, without a cross-store transaction.

use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::category::Category;
use crate::model::note::Note;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

/// Fixed key of the notes snapshot in `notes_store`.
pub const NOTES_KEY: &str = "allNotes";
/// Fixed key of the categories snapshot in `categories_store`.
pub const CATEGORIES_KEY: &str = "allCategories";

pub type StoreResult<T> = Result<T, StoreError>;

/// Snapshot persistence error.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Codec(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Codec(err) => write!(f, "snapshot encoding failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

/// Both collections as last persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoredCollections {
    pub notes: Vec<Note>,
    pub categories: Vec<Category>,
}

/// Persistence contract for whole-collection snapshots.
pub trait SnapshotStore {
    /// Durably writes both collections.
    fn save(&mut self, notes: &[Note], categories: &[Category]) -> StoreResult<()>;
    /// Returns the last-saved collections, or empty ones when nothing has
    /// been saved yet.
    fn load(&self) -> StoreResult<StoredCollections>;
}

/// SQLite-backed snapshot store.
pub struct SqliteSnapshotStore {
    conn: Connection,
}

impl SqliteSnapshotStore {
    /// Wraps a migrated, ready connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens (or creates) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    /// Opens an in-memory store, mainly for tests and probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn save(&mut self, notes: &[Note], categories: &[Category]) -> StoreResult<()> {
        let started_at = Instant::now();
        let notes_json = serde_json::to_string(notes)?;
        let categories_json = serde_json::to_string(categories)?;

        upsert(&self.conn, "notes_store", NOTES_KEY, &notes_json)?;
        upsert(
            &self.conn,
            "categories_store",
            CATEGORIES_KEY,
            &categories_json,
        )?;

        info!(
            "event=snapshot_save module=store status=ok notes={} categories={} duration_ms={}",
            notes.len(),
            categories.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn load(&self) -> StoreResult<StoredCollections> {
        let notes = match read_value(&self.conn, "notes_store", NOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };
        let categories = match read_value(&self.conn, "categories_store", CATEGORIES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        info!(
            "event=snapshot_load module=store status=ok notes={} categories={}",
            notes.len(),
            categories.len()
        );
        Ok(StoredCollections { notes, categories })
    }
}

fn upsert(conn: &Connection, table: &str, key: &str, value: &str) -> StoreResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO {table} (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;"
        ),
        params![key, value],
    )?;
    Ok(())
}

fn read_value(conn: &Connection, table: &str, key: &str) -> StoreResult<Option<String>> {
    let value = conn
        .query_row(&format!("SELECT value FROM {table} WHERE key = ?1;"), [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}
