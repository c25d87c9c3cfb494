//! Client-side note synchronization state.
//!
//! # Responsibility
//! - Hold the list cache, selection, draft buffer and error slot.
//! - Define every legal transition between them, free of IO.
//!
//! # Invariants
//! - Selection is exactly one of `Idle`, `Drafting`, `Viewing`.
//! - A draft buffer exists iff selection is not `Idle`.
//! - Network completions are accepted only with the ticket that requested
//!   them; superseded completions are discarded.

pub mod error;
pub mod list;
pub mod machine;
pub mod selection;
