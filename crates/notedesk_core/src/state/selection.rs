//! Selection and draft buffer types.

use crate::model::note::{
    clamp_chars, Note, NoteId, NoteInput, CONTENT_MAX_CHARS, TITLE_MAX_CHARS,
};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Placeholder identity of an unsaved note.
///
/// Not convertible into `NoteId` and not serializable, so it can never reach
/// the server. It only distinguishes one local draft from the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(Uuid);

impl DraftId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DraftId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for DraftId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "draft-{}", self.0)
    }
}

/// Which note the editor is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected.
    #[default]
    Idle,
    /// A new note is being composed and has no server id yet.
    Drafting(DraftId),
    /// An existing note is loaded into the editor.
    Viewing(NoteId),
}

impl Selection {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_drafting(&self) -> bool {
        matches!(self, Self::Drafting(_))
    }

    /// Returns the viewed note id, if any.
    pub fn viewing_id(&self) -> Option<&NoteId> {
        match self {
            Self::Viewing(id) => Some(id),
            _ => None,
        }
    }

    /// Stable lowercase label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drafting(_) => "drafting",
            Self::Viewing(_) => "viewing",
        }
    }
}

/// Editable draft field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Content,
}

impl DraftField {
    /// Char cap enforced on edits of this field.
    pub fn max_chars(self) -> usize {
        match self {
            Self::Title => TITLE_MAX_CHARS,
            Self::Content => CONTENT_MAX_CHARS,
        }
    }
}

/// Uncommitted title/content pair owned by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
}

impl Draft {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Seeds a draft from a loaded note, verbatim. Only local edits are
    /// clamped; untouched fields go back to the server unchanged.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
        }
    }

    /// Replaces one field, truncating to its cap.
    pub fn set(&mut self, field: DraftField, value: &str) {
        let clamped = clamp_chars(value, field.max_chars());
        match field {
            DraftField::Title => self.title = clamped,
            DraftField::Content => self.content = clamped,
        }
    }

    /// True when both fields are empty; such a draft cannot be saved.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    pub fn to_input(&self) -> NoteInput {
        NoteInput::new(self.title.clone(), self.content.clone())
    }
}
