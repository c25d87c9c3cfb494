//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical `Note` record returned by the notes API.
//! - Define the id-less request body used by create and update.
//! - Derive list summaries with a short plain-text preview.
//!
//! # Invariants
//! - `id`, `created_at` and `updated_at` are server-assigned and never edited.
//! - `title` is capped at `TITLE_MAX_CHARS`, `content` at `CONTENT_MAX_CHARS`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Maximum title length accepted by the editor, in chars.
pub const TITLE_MAX_CHARS: usize = 128;
/// Maximum content length accepted by the editor, in chars.
pub const CONTENT_MAX_CHARS: usize = 4000;

const PREVIEW_MAX_CHARS: usize = 80;
const UNTITLED_LABEL: &str = "Untitled";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Opaque server-assigned note identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NoteId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Canonical note record as returned by the notes API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Opaque server timestamp.
    pub created_at: String,
    /// Opaque server timestamp.
    pub updated_at: String,
}

/// Request body for create and update calls.
///
/// Carries no id: the server assigns ids on create and the update target is
/// addressed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// One row of the list cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSummary {
    pub id: NoteId,
    pub title: String,
    /// Whitespace-collapsed content prefix; `None` for blank content.
    pub preview: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl NoteSummary {
    /// Title shown in the selector, with a placeholder for blank titles.
    pub fn display_title(&self) -> &str {
        let trimmed = self.title.trim();
        if trimmed.is_empty() {
            UNTITLED_LABEL
        } else {
            trimmed
        }
    }
}

impl From<&Note> for NoteSummary {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.clone(),
            title: note.title.clone(),
            preview: derive_preview(note.content.as_str()),
            created_at: note.created_at.clone(),
            updated_at: note.updated_at.clone(),
        }
    }
}

impl From<Note> for NoteSummary {
    fn from(note: Note) -> Self {
        Self::from(&note)
    }
}

/// Derives a single-line preview from note content.
///
/// Whitespace runs collapse to one space and the first 80 chars are kept.
pub fn derive_preview(content: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
}

/// Truncates `value` to at most `max_chars` chars.
pub fn clamp_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
