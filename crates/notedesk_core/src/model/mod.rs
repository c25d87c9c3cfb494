//! Domain model for remote note resources.
//!
//! # Responsibility
//! - Define the wire shape of notes exchanged with the notes API.
//! - Provide the list-row projection rendered by the selector.
//!
//! # Invariants
//! - Every persisted note is identified by a server-assigned `NoteId`.
//! - The client never constructs a `NoteId` for a note it created locally.

pub mod note;
