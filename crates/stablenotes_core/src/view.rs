//! Pure view projection.
//!
//! # Responsibility
//! - Project [`AppState`] into display-ready view models for the three
//!   regions: category sidebar, note list, editor pane.
//! - Own every user-facing label and fallback text.
//!
//! # Invariants
//! - Projection is a pure function of state; no IO, no mutation.
//! - The sidebar always leads with the "All Notes" sentinel entry.

use crate::document::Document;
use crate::model::note::{NoteId, NoteStatus, DEFAULT_NOTE_TITLE};
use crate::state::{AppState, CategoryFilter};

pub const ALL_NOTES_LABEL: &str = "All Notes";
pub const SEARCH_RESULTS_HEADING: &str = "Search results";
pub const EMPTY_SNIPPET_FALLBACK: &str = "No content yet...";
pub const EMPTY_EDITOR_PLACEHOLDER: &str =
    "Select a note to start editing, or create a new one.";

/// Label shown on a note's status badge.
pub fn status_label(status: NoteStatus) -> &'static str {
    match status {
        NoteStatus::Draft => "Draft",
        NoteStatus::InProgress => "In progress",
        NoteStatus::Completed => "Completed",
    }
}

/// One sidebar entry: the sentinel or a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub target: CategoryFilter,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListView {
    pub entries: Vec<CategoryEntry>,
}

/// Why the note list came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyListNotice {
    NoSearchMatches,
    NoNotesInCategory,
}

impl EmptyListNotice {
    pub fn message(self) -> &'static str {
        match self {
            Self::NoSearchMatches => "No notes match your search",
            Self::NoNotesInCategory => "No notes in this category",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    pub id: NoteId,
    pub status: NoteStatus,
    pub status_label: &'static str,
    pub title: String,
    pub snippet: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListView {
    pub heading: String,
    pub items: Vec<NoteListItem>,
    pub empty_notice: Option<EmptyListNotice>,
}

/// Editor pane: the selected note's document, or a disabled placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorPaneView {
    Empty { placeholder: &'static str },
    Active {
        note_id: NoteId,
        title: String,
        status: NoteStatus,
        content: Document,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppView {
    pub sidebar: CategoryListView,
    pub note_list: NoteListView,
    pub editor: EditorPaneView,
}

/// Projects the full application view.
pub fn render(state: &AppState) -> AppView {
    AppView {
        sidebar: render_categories(state),
        note_list: render_note_list(state),
        editor: render_editor(state),
    }
}

/// Sidebar projection: sentinel entry plus one entry per category.
pub fn render_categories(state: &AppState) -> CategoryListView {
    let mut entries = vec![CategoryEntry {
        target: CategoryFilter::All,
        label: ALL_NOTES_LABEL.to_string(),
        active: state.filter() == CategoryFilter::All,
    }];

    for category in &state.categories {
        let target = CategoryFilter::Category(category.id);
        entries.push(CategoryEntry {
            target,
            label: category.name.clone(),
            active: state.filter() == target,
        });
    }

    CategoryListView { entries }
}

/// Note list projection: heading, filtered+sorted items, empty-state notice.
pub fn render_note_list(state: &AppState) -> NoteListView {
    let heading = if state.search_active() {
        SEARCH_RESULTS_HEADING.to_string()
    } else {
        match state.filter() {
            CategoryFilter::All => ALL_NOTES_LABEL.to_string(),
            // A filter may reference a category the current collections no
            // longer contain (e.g. after import); fall back to the sentinel
            // heading instead of showing nothing.
            CategoryFilter::Category(id) => state
                .category(id)
                .map(|category| category.name.clone())
                .unwrap_or_else(|| ALL_NOTES_LABEL.to_string()),
        }
    };

    let items: Vec<NoteListItem> = state
        .visible_notes()
        .into_iter()
        .map(|note| NoteListItem {
            id: note.id,
            status: note.status,
            status_label: status_label(note.status),
            title: if note.title.is_empty() {
                DEFAULT_NOTE_TITLE.to_string()
            } else {
                note.title.clone()
            },
            snippet: if note.snippet.is_empty() {
                EMPTY_SNIPPET_FALLBACK.to_string()
            } else {
                note.snippet.clone()
            },
            active: state.selected() == Some(note.id),
        })
        .collect();

    let empty_notice = if items.is_empty() {
        Some(if state.search_active() {
            EmptyListNotice::NoSearchMatches
        } else {
            EmptyListNotice::NoNotesInCategory
        })
    } else {
        None
    };

    NoteListView {
        heading,
        items,
        empty_notice,
    }
}

/// Editor pane projection.
pub fn render_editor(state: &AppState) -> EditorPaneView {
    match state.selected_note() {
        Some(note) => EditorPaneView::Active {
            note_id: note.id,
            title: note.title.clone(),
            status: note.status,
            content: note.content.clone(),
        },
        None => EditorPaneView::Empty {
            placeholder: EMPTY_EDITOR_PLACEHOLDER,
        },
    }
}

/// Static replacement UI for fatal editor initialization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatalView {
    pub heading: &'static str,
    pub message: &'static str,
}

pub fn fatal_editor_view() -> FatalView {
    FatalView {
        heading: "Failed to load",
        message: "The application could not be initialized. Make sure the \
                  editor components are available, check the logs for \
                  details, then restart.",
    }
}

/// Prompt shown before navigating to an outbound link inside note content.
pub fn navigation_prompt(url: &str) -> String {
    format!("Open this link?\n{url}")
}
