//! Core client logic for notedesk.
//! This crate is the single source of truth for note synchronization rules.

pub mod api;
pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;

pub use api::{ApiError, ApiOp, ApiResult, HttpNotesApi, MemoryNotesApi, NotesApi};
pub use config::{ApiBackend, ClientConfig, ConfigError};
pub use logging::{init_logging, LoggingError};
pub use model::note::{Note, NoteId, NoteInput, NoteSummary, CONTENT_MAX_CHARS, TITLE_MAX_CHARS};
pub use service::notes_controller::{Intent, NotesController};
pub use state::error::ErrorKind;
pub use state::machine::{NotesSnapshot, NotesState, Outcome};
pub use state::selection::{Draft, DraftField, DraftId, Selection};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
