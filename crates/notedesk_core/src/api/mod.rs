//! Remote note resource client.
//!
//! # Responsibility
//! - Define the `NotesApi` contract mapping CRUD intents to remote calls.
//! - Collapse every non-success outcome into a typed `ApiError`.
//!
//! # Invariants
//! - Each operation is exactly one request/response round trip.
//! - No retries, no backoff, no caching.
//! - Error response bodies are never parsed for detail.

use crate::model::note::{Note, NoteId, NoteInput};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod memory;

pub use http::HttpNotesApi;
pub use memory::{ApiOp, MemoryNotesApi, RecordedRequest};

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of one notes API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be sent or the response could not be read.
    Transport(String),
    /// Server answered with a non-2xx status.
    Status { status: u16 },
    /// 2xx response body did not match the expected JSON shape.
    Decode(String),
    /// Configured base URL cannot address the notes resource.
    InvalidBaseUrl(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "transport failure: {message}"),
            Self::Status { status } => write!(f, "unexpected response status {status}"),
            Self::Decode(message) => write!(f, "invalid response body: {message}"),
            Self::InvalidBaseUrl(value) => write!(f, "invalid base url: `{value}`"),
        }
    }
}

impl Error for ApiError {}

/// CRUD contract for the `notes` resource.
///
/// Implementations hold no note state of their own between calls apart from
/// what the backend itself persists.
pub trait NotesApi {
    /// Lists all notes in server order.
    fn list(&self) -> ApiResult<Vec<Note>>;
    /// Loads one note by id.
    fn get(&self, id: &NoteId) -> ApiResult<Note>;
    /// Creates one note; the server assigns id and timestamps.
    fn create(&self, input: &NoteInput) -> ApiResult<Note>;
    /// Replaces title and content of one note.
    fn update(&self, id: &NoteId, input: &NoteInput) -> ApiResult<Note>;
    /// Deletes one note.
    fn delete(&self, id: &NoteId) -> ApiResult<()>;
}

impl<T: NotesApi + ?Sized> NotesApi for &T {
    fn list(&self) -> ApiResult<Vec<Note>> {
        (**self).list()
    }

    fn get(&self, id: &NoteId) -> ApiResult<Note> {
        (**self).get(id)
    }

    fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        (**self).create(input)
    }

    fn update(&self, id: &NoteId, input: &NoteInput) -> ApiResult<Note> {
        (**self).update(id, input)
    }

    fn delete(&self, id: &NoteId) -> ApiResult<()> {
        (**self).delete(id)
    }
}

impl<T: NotesApi + ?Sized> NotesApi for Box<T> {
    fn list(&self) -> ApiResult<Vec<Note>> {
        (**self).list()
    }

    fn get(&self, id: &NoteId) -> ApiResult<Note> {
        (**self).get(id)
    }

    fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        (**self).create(input)
    }

    fn update(&self, id: &NoteId, input: &NoteInput) -> ApiResult<Note> {
        (**self).update(id, input)
    }

    fn delete(&self, id: &NoteId) -> ApiResult<()> {
        (**self).delete(id)
    }
}
