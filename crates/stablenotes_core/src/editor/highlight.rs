//! Code-block syntax highlighting.
//!
//! # Responsibility
//! - Turn code-block source text into per-line colored spans using the
//!   bundled syntax and theme assets.
//!
//! # Invariants
//! - Unknown language tokens fall back to plain text instead of failing.

use crate::editor::{EditorError, EditorResult};
use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const DEFAULT_THEME: &str = "InspiredGitHub";

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);

/// One colored run inside a highlighted code line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSpan {
    pub text: String,
    /// Foreground color as `(r, g, b)`.
    pub foreground: (u8, u8, u8),
}

/// Loads the bundled default theme.
///
/// Failure here means the third-party highlighting assets are unusable;
/// callers treat it as fatal editor initialization failure.
pub fn default_theme() -> EditorResult<Theme> {
    let themes = ThemeSet::load_defaults();
    themes.themes.get(DEFAULT_THEME).cloned().ok_or_else(|| {
        EditorError::HighlighterUnavailable(format!(
            "theme `{DEFAULT_THEME}` missing from bundled assets"
        ))
    })
}

/// Highlights one code block into per-line colored spans.
pub fn highlight_code_block(
    source: &str,
    language: Option<&str>,
    theme: &Theme,
) -> EditorResult<Vec<Vec<CodeSpan>>> {
    let syntax = language
        .and_then(|token| SYNTAX_SET.find_syntax_by_token(token))
        .unwrap_or_else(|| SYNTAX_SET.find_syntax_plain_text());

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(source) {
        let regions = highlighter
            .highlight_line(line, &SYNTAX_SET)
            .map_err(|err| EditorError::Highlight(err.to_string()))?;
        lines.push(
            regions
                .into_iter()
                .map(|(style, text)| CodeSpan {
                    text: text.to_string(),
                    foreground: (
                        style.foreground.r,
                        style.foreground.g,
                        style.foreground.b,
                    ),
                })
                .collect(),
        );
    }
    Ok(lines)
}
