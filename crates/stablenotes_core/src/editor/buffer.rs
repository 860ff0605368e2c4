//! In-memory editor implementation.
//!
//! # Responsibility
//! - Hold the live document for the selected note and apply user edits.
//! - Fire the change listener on user edits only; programmatic loads stay
//!   silent so the application never mistakes a load for an edit.
//!
//! # Invariants
//! - The editor starts disabled; it is enabled only while a note is loaded.
//! - Image embeds are validated as inline `data:image/...` payloads before
//!   entering the document.

use crate::document::{DocOp, Document, Insert};
use crate::editor::highlight::{self, CodeSpan};
use crate::editor::{ChangeListener, EditOp, EditorError, EditorPort, EditorResult};
use once_cell::sync::Lazy;
use regex::Regex;
use syntect::highlighting::Theme;

static DATA_IMAGE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^data:image/[A-Za-z0-9.+-]+;base64,").expect("valid data url regex")
});

const IMAGE_ERROR_DETAIL_CHARS: usize = 32;

/// Buffer-backed [`EditorPort`] implementation.
pub struct BufferEditor {
    document: Document,
    enabled: bool,
    listener: Option<ChangeListener>,
    theme: Theme,
}

impl BufferEditor {
    /// Creates a disabled editor with an empty document.
    ///
    /// # Errors
    /// - [`EditorError::HighlighterUnavailable`] when the bundled
    ///   highlighting assets cannot be loaded. Callers should treat this as
    ///   fatal and surface the static failure view.
    pub fn new() -> EditorResult<Self> {
        let theme = highlight::default_theme()?;
        Ok(Self {
            document: Document::empty(),
            enabled: false,
            listener: None,
            theme,
        })
    }

    /// Highlights code-block source text with the editor's theme.
    pub fn highlight(
        &self,
        source: &str,
        language: Option<&str>,
    ) -> EditorResult<Vec<Vec<CodeSpan>>> {
        highlight::highlight_code_block(source, language, &self.theme)
    }

    fn notify(&mut self) {
        let Self {
            document, listener, ..
        } = self;
        if let Some(listener) = listener.as_mut() {
            listener(document);
        }
    }
}

impl EditorPort for BufferEditor {
    fn load_document(&mut self, document: Document) {
        // Loads replace the buffer without notifying: the listener is for
        // user edits, and a load must never schedule a save.
        self.document = document;
    }

    fn document(&self) -> &Document {
        &self.document
    }

    fn plain_text_prefix(&self, max_chars: usize) -> String {
        self.document.plain_text_prefix(max_chars)
    }

    fn on_change(&mut self, listener: ChangeListener) {
        self.listener = Some(listener);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn apply(&mut self, op: EditOp) -> EditorResult<()> {
        if !self.enabled {
            return Err(EditorError::Disabled);
        }

        match op {
            EditOp::InsertText { text, attributes } => {
                self.document.ops.push(DocOp {
                    insert: Insert::Text(text),
                    attributes,
                });
            }
            EditOp::InsertImage { data_url } => {
                if !DATA_IMAGE_URL_RE.is_match(&data_url) {
                    let head: String = data_url.chars().take(IMAGE_ERROR_DETAIL_CHARS).collect();
                    return Err(EditorError::InvalidImageData(head));
                }
                self.document.ops.push(DocOp::image(data_url));
            }
            EditOp::InsertRule => {
                self.document.ops.push(DocOp::rule());
            }
            EditOp::Replace { document } => {
                self.document = document;
            }
        }

        self.notify();
        Ok(())
    }
}
