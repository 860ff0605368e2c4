//! Whole-collection snapshot persistence.
//!
//! # Responsibility
//! - Define the snapshot store contract used by the application shell.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Each collection lives in its own store under a fixed key; writes always
//!   replace the full snapshot.

pub mod snapshot;

pub use snapshot::{
    SnapshotStore, SqliteSnapshotStore, StoreError, StoreResult, StoredCollections,
    CATEGORIES_KEY, NOTES_KEY,
};
