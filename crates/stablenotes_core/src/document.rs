//! Structured rich-text document format.
//!
//! # Responsibility
//! - Define the ordered-operation document shape shared by editor, model and
//!   backup serialization.
//! - Restrict style attributes to the fixed allowed-value sets.
//! - Derive the plain-text snippet used by list projections.
//!
//! # Invariants
//! - A document is a flat sequence of inserts; block structure is implied by
//!   newlines inside text runs, matching the serialized editor format.
//! - `lineHeight` and `letterSpacing` only ever hold whitelisted values;
//!   anything else fails to decode.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Maximum characters kept in a derived note snippet.
pub const SNIPPET_MAX_CHARS: usize = 100;

static NEWLINE_RUNS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n+").expect("valid newline regex"));

/// Per-block line height. Closed set; off-whitelist values are rejected at
/// decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineHeight {
    #[serde(rename = "1")]
    Single,
    #[serde(rename = "1.5")]
    OneAndHalf,
    #[serde(rename = "2")]
    Double,
    #[serde(rename = "2.5")]
    TwoAndHalf,
}

impl LineHeight {
    /// CSS value this variant serializes as.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Single => "1",
            Self::OneAndHalf => "1.5",
            Self::Double => "2",
            Self::TwoAndHalf => "2.5",
        }
    }
}

/// Per-span letter spacing. Closed set, same policy as [`LineHeight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterSpacing {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "1px")]
    OnePixel,
    #[serde(rename = "2px")]
    TwoPixels,
}

impl LetterSpacing {
    /// CSS value this variant serializes as.
    pub fn css_value(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::OnePixel => "1px",
            Self::TwoPixels => "2px",
        }
    }
}

/// Style attributes attached to one document operation.
///
/// All fields are optional; absent fields are omitted from serialization to
/// keep stored documents compact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Language token for code blocks, e.g. `rust`.
    #[serde(rename = "code-block", default, skip_serializing_if = "Option::is_none")]
    pub code_block: Option<String>,
    #[serde(rename = "lineHeight", default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeight>,
    #[serde(rename = "letterSpacing", default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<LetterSpacing>,
}

impl Attributes {
    /// Returns whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Payload of one document operation: a text run or an embedded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insert {
    /// Plain text run; may contain newlines.
    Text(String),
    /// Image embedded inline as a `data:image/...` URL.
    Image { image: String },
    /// Horizontal rule block embed.
    Rule { hr: bool },
}

/// One ordered document operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocOp {
    pub insert: Insert,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
}

impl DocOp {
    /// Creates an unattributed text run.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            insert: Insert::Text(value.into()),
            attributes: None,
        }
    }

    /// Creates an attributed text run.
    pub fn styled_text(value: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            insert: Insert::Text(value.into()),
            attributes: Some(attributes),
        }
    }

    /// Creates an inline image embed. The data URL is validated by the
    /// editor, not here.
    pub fn image(data_url: impl Into<String>) -> Self {
        Self {
            insert: Insert::Image {
                image: data_url.into(),
            },
            attributes: None,
        }
    }

    /// Creates a horizontal rule embed.
    pub fn rule() -> Self {
        Self {
            insert: Insert::Rule { hr: true },
            attributes: None,
        }
    }
}

/// Opaque structured rich-text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub ops: Vec<DocOp>,
}

impl Document {
    /// The document every new note starts from: a single empty line.
    pub fn empty() -> Self {
        Self {
            ops: vec![DocOp::text("\n")],
        }
    }

    /// Builds a document from plain text, appending the terminating newline
    /// the editor format expects.
    pub fn from_plain_text(text: impl Into<String>) -> Self {
        let mut text = text.into();
        if !text.ends_with('\n') {
            text.push('\n');
        }
        Self {
            ops: vec![DocOp::text(text)],
        }
    }

    /// Concatenated text runs. Embeds contribute nothing.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for op in &self.ops {
            if let Insert::Text(value) = &op.insert {
                out.push_str(value);
            }
        }
        out
    }

    /// Derived snippet: the first `max_chars` characters of the plain text,
    /// with newline runs collapsed to single spaces and ends trimmed.
    pub fn plain_text_prefix(&self, max_chars: usize) -> String {
        let prefix: String = self.plain_text().chars().take(max_chars).collect();
        NEWLINE_RUNS_RE.replace_all(&prefix, " ").trim().to_string()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}
