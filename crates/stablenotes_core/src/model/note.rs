//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical note record shared by list and detail projections.
//! - Keep `updated_at` strictly monotonic across mutations.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `snippet` is derived from `content`, never authored directly.
//! - A non-null `category_id` should reference an existing category. This is
//!   not enforced; imports may carry dangling references.

use crate::document::Document;
use crate::model::category::CategoryId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Title assigned to freshly created notes.
pub const DEFAULT_NOTE_TITLE: &str = "Untitled note";

/// Editorial lifecycle state of a note.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteStatus {
    /// Created but not finished.
    #[default]
    Draft,
    /// Actively being written.
    InProgress,
    /// Done; kept for reference.
    Completed,
}

/// A user-authored rich-text document with metadata.
///
/// Serialized field names match the external backup schema (`plainText`,
/// `categoryId`, ...), which predates this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    /// Structured rich-text body owned by the editor capability.
    pub content: Document,
    /// Derived plain-text preview of `content`.
    #[serde(rename = "plainText")]
    pub snippet: String,
    pub category_id: Option<CategoryId>,
    pub status: NoteStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Refreshed via [`Note::touch`] on mutation.
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty draft note with a generated stable ID.
    pub fn new(category_id: Option<CategoryId>, now_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: DEFAULT_NOTE_TITLE.to_string(),
            content: Document::empty(),
            snippet: String::new(),
            category_id,
            status: NoteStatus::Draft,
            created_at: now_ms,
            updated_at: now_ms,
        }
    }

    /// Bumps `updated_at` so that it strictly increases even when the wall
    /// clock has not advanced between two edits.
    pub fn touch(&mut self, now_ms: i64) {
        self.updated_at = now_ms.max(self.updated_at + 1);
    }
}
