//! Command handlers.
//!
//! # Responsibility
//! - Apply user commands to [`AppState`] and report the side effects the
//!   shell must run: persist, schedule a debounced save, re-render a region.
//! - Keep command logic free of IO so every contract is testable in memory.
//!
//! # Invariants
//! - Missing selection makes edit/delete/status commands silent no-ops.
//! - Empty or whitespace-only category names are silently ignored.
//! - Declined confirmations never mutate state.
//! - Title/content edits request a debounced save; their note-list
//!   re-render follows the write when the debounce fires, never before.

use crate::backup::Backup;
use crate::document::{Document, SNIPPET_MAX_CHARS};
use crate::model::category::Category;
use crate::model::note::{Note, NoteId, NoteStatus};
use crate::schedule::SaveSlot;
use crate::state::{AppState, CategoryFilter};

/// Outcome of a confirmation dialog, supplied by the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Confirmed,
    Declined,
}

/// View region a command invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    All,
    CategoryList,
    NoteList,
}

/// One side effect requested by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Write both collections to the snapshot store now.
    Persist,
    /// (Re)start the debounced save for one slot.
    ScheduleSave(SaveSlot),
    /// Re-render one view region after pending persistence settled.
    Render(Region),
}

/// Effects requested by one command dispatch. Empty means no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub effects: Vec<Effect>,
}

impl Outcome {
    pub fn none() -> Self {
        Self::default()
    }

    fn of(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn is_noop(&self) -> bool {
        self.effects.is_empty()
    }

    /// The region this outcome asks to re-render, if any.
    pub fn render_region(&self) -> Option<Region> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Render(region) => Some(*region),
            _ => None,
        })
    }
}

/// Appends a category with a fresh id. Blank names abort silently.
pub fn add_category(state: &mut AppState, name: &str) -> Outcome {
    let name = name.trim();
    if name.is_empty() {
        return Outcome::none();
    }

    state.categories.push(Category::new(name));
    Outcome::of(vec![Effect::Persist, Effect::Render(Region::CategoryList)])
}

/// Prepends a fresh draft note scoped to the current filter and selects it.
pub fn add_note(state: &mut AppState, now_ms: i64) -> Outcome {
    let category_id = match state.filter() {
        CategoryFilter::All => None,
        CategoryFilter::Category(id) => Some(id),
    };

    let note = Note::new(category_id, now_ms);
    let id = note.id;
    state.notes.insert(0, note);
    state.select(id);

    Outcome::of(vec![Effect::Persist, Effect::Render(Region::All)])
}

/// Irreversibly removes the selected note once the user confirmed.
pub fn delete_selected_note(state: &mut AppState, decision: Decision) -> Outcome {
    let Some(id) = state.selected() else {
        return Outcome::none();
    };
    if decision == Decision::Declined {
        return Outcome::none();
    }

    state.notes.retain(|note| note.id != id);
    state.clear_selection();
    Outcome::of(vec![Effect::Persist, Effect::Render(Region::All)])
}

/// Updates the selected note's title and restarts the title debounce.
pub fn edit_title(state: &mut AppState, title: &str, now_ms: i64) -> Outcome {
    let Some(note) = state.selected_note_mut() else {
        return Outcome::none();
    };

    note.title = title.to_string();
    note.touch(now_ms);
    Outcome::of(vec![Effect::ScheduleSave(SaveSlot::Title)])
}

/// Replaces the selected note's content, re-derives the snippet and
/// restarts the content debounce.
pub fn edit_content(state: &mut AppState, document: Document, now_ms: i64) -> Outcome {
    let Some(note) = state.selected_note_mut() else {
        return Outcome::none();
    };

    note.snippet = document.plain_text_prefix(SNIPPET_MAX_CHARS);
    note.content = document;
    note.touch(now_ms);
    Outcome::of(vec![Effect::ScheduleSave(SaveSlot::Content)])
}

/// Updates the selected note's status; persists immediately.
pub fn change_status(state: &mut AppState, status: NoteStatus, now_ms: i64) -> Outcome {
    let Some(note) = state.selected_note_mut() else {
        return Outcome::none();
    };

    note.status = status;
    note.touch(now_ms);
    Outcome::of(vec![Effect::Persist, Effect::Render(Region::NoteList)])
}

/// Selects a note for editing. Unknown ids and re-selection are no-ops.
pub fn select_note(state: &mut AppState, id: NoteId) -> Outcome {
    if state.selected() == Some(id) {
        return Outcome::none();
    }
    if !state.select(id) {
        return Outcome::none();
    }
    Outcome::of(vec![Effect::Render(Region::All)])
}

/// Switches the category filter, clearing search and selection.
pub fn select_category(state: &mut AppState, filter: CategoryFilter) -> Outcome {
    state.set_filter(filter);
    Outcome::of(vec![Effect::Render(Region::All)])
}

/// Updates the live search text, resetting the filter and selection.
pub fn search_changed(state: &mut AppState, text: &str) -> Outcome {
    state.set_search(text);
    Outcome::of(vec![Effect::Render(Region::All)])
}

/// Replaces both collections from a validated backup once the user
/// confirmed the overwrite.
pub fn import_backup(state: &mut AppState, backup: Backup, decision: Decision) -> Outcome {
    if decision == Decision::Declined {
        return Outcome::none();
    }

    state.replace_all(backup.notes, backup.categories);
    Outcome::of(vec![Effect::Persist, Effect::Render(Region::All)])
}
