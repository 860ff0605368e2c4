//! Rich-text editing capability boundary.
//!
//! # Responsibility
//! - Define the replaceable editor interface the application orchestrates:
//!   document load/read, plain-text derivation, change notification and the
//!   enabled/read-only switch.
//! - Keep the concrete editing technology pluggable behind [`EditorPort`].
//!
//! # Invariants
//! - Programmatic document loads never fire the change listener; only user
//!   edits do.
//! - A disabled editor rejects every edit.

pub mod buffer;
pub mod highlight;

pub use buffer::BufferEditor;
pub use highlight::{highlight_code_block, CodeSpan};

use crate::document::{Attributes, Document};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EditorResult<T> = Result<T, EditorError>;

/// Editor capability error.
#[derive(Debug)]
pub enum EditorError {
    /// Edits are rejected while no note is loaded.
    Disabled,
    /// Image embeds must carry inline `data:image/...` payloads.
    InvalidImageData(String),
    /// Required highlighting assets failed to load. Treated as fatal at
    /// startup.
    HighlighterUnavailable(String),
    /// The highlighting backend rejected the input.
    Highlight(String),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "editor is disabled; select a note first"),
            Self::InvalidImageData(details) => {
                write!(f, "image embeds require an inline data URL: {details}")
            }
            Self::HighlighterUnavailable(details) => {
                write!(f, "editor components failed to initialize: {details}")
            }
            Self::Highlight(details) => write!(f, "code highlighting failed: {details}"),
        }
    }
}

impl Error for EditorError {}

/// Listener invoked after every user edit with the updated document.
pub type ChangeListener = Box<dyn FnMut(&Document)>;

/// One user-initiated edit applied to the live document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    /// Appends a text run, optionally styled.
    InsertText {
        text: String,
        attributes: Option<Attributes>,
    },
    /// Appends an inline image embed.
    InsertImage { data_url: String },
    /// Appends a horizontal rule embed.
    InsertRule,
    /// Replaces the whole document, as after an editor-internal transform.
    Replace { document: Document },
}

/// Replaceable rich-text editing capability.
pub trait EditorPort {
    /// Programmatically loads a document. Must not fire the change listener.
    fn load_document(&mut self, document: Document);
    /// Current live document.
    fn document(&self) -> &Document;
    /// Plain-text prefix of the live document, snippet rules applied.
    fn plain_text_prefix(&self, max_chars: usize) -> String;
    /// Installs the change listener, replacing any previous one.
    fn on_change(&mut self, listener: ChangeListener);
    /// Switches user edits on or off.
    fn set_enabled(&mut self, enabled: bool);
    fn is_enabled(&self) -> bool;
    /// Applies one user edit and fires the change listener.
    fn apply(&mut self, op: EditOp) -> EditorResult<()>;
}
