//! Use-case services.
//!
//! # Responsibility
//! - Drive the IO-free state machine with a concrete `NotesApi`.
//! - Keep presentation layers decoupled from ticket plumbing.

pub mod notes_controller;
