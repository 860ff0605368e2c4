//! Application state and selection.
//!
//! # Responsibility
//! - Hold the in-memory note/category collections and the transient UI
//!   selection: category filter, selected note, live search text.
//! - Project the filtered, sorted note list used for display.
//!
//! # Invariants
//! - At most one note is selected at a time.
//! - Changing the category filter or the search text clears the selection.
//! - Non-empty search text overrides the category filter.
//! - Display order is always `updated_at` descending.

use crate::model::category::{Category, CategoryId};
use crate::model::note::{Note, NoteId};

/// Category scope for the note list: the sentinel "all" or one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(CategoryId),
}

/// In-memory mirror of all persisted data plus transient UI selection.
#[derive(Debug, Default)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub categories: Vec<Category>,
    filter: CategoryFilter,
    selected: Option<NoteId>,
    search: String,
}

impl AppState {
    pub fn new(notes: Vec<Note>, categories: Vec<Category>) -> Self {
        Self {
            notes,
            categories,
            filter: CategoryFilter::All,
            selected: None,
            search: String::new(),
        }
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn selected(&self) -> Option<NoteId> {
        self.selected
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether search currently overrides the category filter.
    pub fn search_active(&self) -> bool {
        !self.search.is_empty()
    }

    /// Switches the category filter. Resets the search box and drops the
    /// selection.
    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
        self.search.clear();
        self.selected = None;
    }

    /// Updates the live search text. Search spans every note, so the
    /// category filter falls back to All and the selection is dropped.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
        self.filter = CategoryFilter::All;
        self.selected = None;
    }

    /// Selects `id` if such a note exists. Returns whether it did.
    pub fn select(&mut self, id: NoteId) -> bool {
        if self.note(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|id| self.note(id))
    }

    pub fn selected_note_mut(&mut self) -> Option<&mut Note> {
        let id = self.selected?;
        self.notes.iter_mut().find(|note| note.id == id)
    }

    /// Replaces both collections wholesale (import path) and resets every
    /// transient selection: filter, selected note, search text.
    pub fn replace_all(&mut self, notes: Vec<Note>, categories: Vec<Category>) {
        self.notes = notes;
        self.categories = categories;
        self.filter = CategoryFilter::All;
        self.selected = None;
        self.search.clear();
    }

    /// Filtered and sorted notes for display.
    ///
    /// Non-empty search text matches case-insensitively against title or
    /// snippet across every category; otherwise the category filter applies.
    pub fn visible_notes(&self) -> Vec<&Note> {
        let mut visible: Vec<&Note> = if self.search_active() {
            let needle = self.search.to_lowercase();
            self.notes
                .iter()
                .filter(|note| {
                    note.title.to_lowercase().contains(&needle)
                        || note.snippet.to_lowercase().contains(&needle)
                })
                .collect()
        } else {
            match self.filter {
                CategoryFilter::All => self.notes.iter().collect(),
                CategoryFilter::Category(id) => self
                    .notes
                    .iter()
                    .filter(|note| note.category_id == Some(id))
                    .collect(),
            }
        };

        visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        visible
    }
}
