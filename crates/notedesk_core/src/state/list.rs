//! List cache of note summaries.
//!
//! # Invariants
//! - The cache is only ever replaced wholesale, never patched.
//! - Only the newest issued refresh may replace the cache.

use crate::model::note::{Note, NoteId, NoteSummary};

/// Proof that a list refresh was requested; required to apply its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Locally held copy of all note summaries, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCache {
    items: Vec<NoteSummary>,
    loaded: bool,
    issued: u64,
}

impl ListCache {
    /// Issues a ticket for a new full re-list, superseding older ones.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket {
            generation: self.issued,
        }
    }

    /// Returns whether `ticket` belongs to the newest issued refresh.
    pub fn is_current(&self, ticket: &RefreshTicket) -> bool {
        ticket.generation == self.issued
    }

    /// Replaces the cache with `notes` if `ticket` is current.
    ///
    /// Returns `false` and leaves the cache untouched for stale tickets.
    pub fn apply(&mut self, ticket: &RefreshTicket, notes: &[Note]) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.items = notes.iter().map(NoteSummary::from).collect();
        self.loaded = true;
        true
    }

    pub fn items(&self) -> &[NoteSummary] {
        &self.items
    }

    pub fn get(&self, id: &NoteId) -> Option<&NoteSummary> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &NoteId) -> bool {
        self.get(id).is_some()
    }

    /// True once at least one refresh has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
