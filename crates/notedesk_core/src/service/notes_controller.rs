//! Notes controller: intent dispatch over one state container and one API.
//!
//! # Responsibility
//! - Expose the fixed set of user intents as entry points.
//! - Run each intent's round trip synchronously and feed the completion back
//!   through its ticket.
//! - Refresh the list after every successful mutation.
//!
//! # Invariants
//! - No API error escapes: failures end up in the error slot.
//! - Presentation code reads state only through `snapshot()`.

use crate::api::NotesApi;
use crate::model::note::NoteId;
use crate::state::list::RefreshTicket;
use crate::state::machine::{MutationDone, NotesSnapshot, NotesState, Outcome, SaveRequest};
use crate::state::selection::DraftField;

/// User intent emitted by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Refresh,
    Select(NoteId),
    New,
    Edit(DraftField, String),
    Save,
    Delete,
    Deselect,
    Cancel,
    DismissError,
}

/// Owns the notes state and the API it synchronizes with.
pub struct NotesController<A: NotesApi> {
    api: A,
    state: NotesState,
}

impl<A: NotesApi> NotesController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: NotesState::new(),
        }
    }

    /// Performs the initial list load.
    pub fn mount(&mut self) -> Outcome {
        self.refresh()
    }

    pub fn refresh(&mut self) -> Outcome {
        let ticket = self.state.begin_refresh();
        self.run_refresh(ticket)
    }

    pub fn select(&mut self, id: NoteId) -> Outcome {
        let Some(ticket) = self.state.begin_select(id) else {
            return Outcome::Ignored;
        };
        let result = self.api.get(ticket.id());
        self.state.finish_select(ticket, result)
    }

    pub fn new_note(&mut self) -> Outcome {
        self.state.new_draft()
    }

    pub fn edit(&mut self, field: DraftField, value: &str) -> Outcome {
        self.state.edit(field, value)
    }

    pub fn save(&mut self) -> Outcome {
        let Some(ticket) = self.state.begin_save() else {
            return Outcome::Ignored;
        };
        let result = match ticket.request() {
            SaveRequest::Create(input) => self.api.create(input),
            SaveRequest::Update(id, input) => self.api.update(id, input),
        };
        let done = self.state.finish_save(ticket, result);
        self.settle(done)
    }

    pub fn delete(&mut self) -> Outcome {
        let Some(ticket) = self.state.begin_delete() else {
            return Outcome::Ignored;
        };
        let result = self.api.delete(ticket.id());
        let done = self.state.finish_delete(ticket, result);
        self.settle(done)
    }

    pub fn deselect(&mut self) -> Outcome {
        self.state.deselect()
    }

    pub fn cancel(&mut self) -> Outcome {
        self.state.cancel_draft()
    }

    pub fn dismiss_error(&mut self) -> Outcome {
        self.state.dismiss_error()
    }

    /// Routes one intent to its entry point.
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Refresh => self.refresh(),
            Intent::Select(id) => self.select(id),
            Intent::New => self.new_note(),
            Intent::Edit(field, value) => self.edit(field, value.as_str()),
            Intent::Save => self.save(),
            Intent::Delete => self.delete(),
            Intent::Deselect => self.deselect(),
            Intent::Cancel => self.cancel(),
            Intent::DismissError => self.dismiss_error(),
        }
    }

    pub fn snapshot(&self) -> NotesSnapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &NotesState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    fn run_refresh(&mut self, ticket: RefreshTicket) -> Outcome {
        let result = self.api.list();
        self.state.finish_refresh(ticket, result)
    }

    // The mutation outcome wins over the refresh outcome; a failed re-list is
    // still visible through the error slot.
    fn settle(&mut self, done: MutationDone) -> Outcome {
        if let Some(ticket) = done.refresh {
            self.run_refresh(ticket);
        }
        done.outcome
    }
}
