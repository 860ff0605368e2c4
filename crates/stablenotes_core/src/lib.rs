//! Core domain logic for StableNotes.
//! This crate is the single source of truth for state, persistence and view
//! projection; shells stay thin.

pub mod app;
pub mod backup;
pub mod command;
pub mod db;
pub mod document;
pub mod editor;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod state;
pub mod store;
pub mod view;

pub use app::{wall_clock_ms, App, AppError, AppResult};
pub use backup::{Backup, BackupError, BackupFile};
pub use command::{Decision, Effect, Outcome, Region};
pub use document::{
    Attributes, DocOp, Document, Insert, LetterSpacing, LineHeight, SNIPPET_MAX_CHARS,
};
pub use editor::{BufferEditor, EditOp, EditorError, EditorPort};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryId};
pub use model::note::{Note, NoteId, NoteStatus, DEFAULT_NOTE_TITLE};
pub use schedule::{DebounceScheduler, SaveSlot};
pub use state::{AppState, CategoryFilter};
pub use store::{SnapshotStore, SqliteSnapshotStore, StoreError, StoredCollections};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
