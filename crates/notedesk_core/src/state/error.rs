//! Single most-recent-error slot.
//!
//! Every failure category maps to one fixed user-facing message. Causes
//! (status codes, transport errors) are logged by callers and never stored
//! here.

use std::fmt::{Display, Formatter};

/// User-visible failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LoadListFailed,
    LoadNoteFailed,
    SaveFailed,
    DeleteFailed,
}

impl ErrorKind {
    /// Banner text shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            Self::LoadListFailed => "Failed to load notes.",
            Self::LoadNoteFailed => "Failed to load note.",
            Self::SaveFailed => "Failed to save note.",
            Self::DeleteFailed => "Failed to delete note.",
        }
    }

    /// Stable snake_case code for logs.
    pub fn code(self) -> &'static str {
        match self {
            Self::LoadListFailed => "load_list_failed",
            Self::LoadNoteFailed => "load_note_failed",
            Self::SaveFailed => "save_failed",
            Self::DeleteFailed => "delete_failed",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Holds at most one error; the newest one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlot {
    current: Option<ErrorKind>,
}

impl ErrorSlot {
    pub fn raise(&mut self, kind: ErrorKind) {
        self.current = Some(kind);
    }

    /// Clears the slot. Returns whether an error was present.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    pub fn current(&self) -> Option<ErrorKind> {
        self.current
    }

    pub fn message(&self) -> Option<&'static str> {
        self.current.map(ErrorKind::message)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ErrorSlot};

    #[test]
    fn newest_error_overwrites_previous() {
        let mut slot = ErrorSlot::default();
        slot.raise(ErrorKind::SaveFailed);
        slot.raise(ErrorKind::LoadListFailed);
        assert_eq!(slot.current(), Some(ErrorKind::LoadListFailed));
        assert_eq!(slot.message(), Some("Failed to load notes."));
    }

    #[test]
    fn dismiss_reports_whether_slot_was_filled() {
        let mut slot = ErrorSlot::default();
        assert!(!slot.dismiss());
        slot.raise(ErrorKind::DeleteFailed);
        assert!(slot.dismiss());
        assert_eq!(slot.current(), None);
    }
}
