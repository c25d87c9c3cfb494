//! Note synchronization state machine.
//!
//! # Responsibility
//! - Apply user intents (select, new, edit, save, delete, deselect) to the
//!   selection, draft buffer, list cache and error slot.
//! - Issue tickets for every network round trip and accept completions only
//!   through those tickets.
//!
//! # Invariants
//! - `draft.is_some() == !selection.is_idle()`.
//! - Every selection change bumps `intent_generation`, including a load that
//!   completes successfully; load, save and delete completions issued under an
//!   older generation never change the selection or the draft.
//! - At most one save/delete is outstanding (`busy`). Selection changes are
//!   not blocked by it.
//! - The list cache changes only through `finish_refresh`.

use crate::api::ApiResult;
use crate::model::note::{Note, NoteId, NoteInput, NoteSummary};
use crate::state::error::{ErrorKind, ErrorSlot};
use crate::state::list::{ListCache, RefreshTicket};
use crate::state::selection::{Draft, DraftField, DraftId, Selection};
use log::{debug, info, warn};

/// Result of applying one intent or completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested.
    Applied,
    /// The intent is not valid in the current state; nothing changed.
    Ignored,
    /// The completion belongs to a superseded intent and was discarded.
    Stale,
    /// The request failed; the error slot now holds this kind.
    Failed(ErrorKind),
}

/// Ticket for loading one note into the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    id: NoteId,
}

impl LoadTicket {
    pub fn id(&self) -> &NoteId {
        &self.id
    }
}

/// Remote call a save ticket stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveRequest {
    Create(NoteInput),
    Update(NoteId, NoteInput),
}

/// Ticket for one outstanding save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    generation: u64,
    request: SaveRequest,
}

impl SaveTicket {
    pub fn request(&self) -> &SaveRequest {
        &self.request
    }
}

/// Ticket for one outstanding delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    generation: u64,
    id: NoteId,
}

impl DeleteTicket {
    pub fn id(&self) -> &NoteId {
        &self.id
    }
}

/// Completion of a save or delete.
///
/// `refresh` is set whenever the remote mutation succeeded, even if the
/// selection moved on meanwhile; the caller must run that re-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationDone {
    pub outcome: Outcome,
    pub refresh: Option<RefreshTicket>,
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesSnapshot {
    pub notes: Vec<NoteSummary>,
    pub list_loaded: bool,
    pub selection: Selection,
    pub draft: Option<Draft>,
    /// Note currently being fetched for the editor.
    pub loading: Option<NoteId>,
    /// A save or delete is outstanding.
    pub busy: bool,
    pub error: Option<ErrorKind>,
    pub can_save: bool,
    pub can_delete: bool,
}

impl NotesSnapshot {
    pub fn error_message(&self) -> Option<&'static str> {
        self.error.map(ErrorKind::message)
    }

    /// True when the list has loaded and holds no notes.
    pub fn is_empty_state(&self) -> bool {
        self.list_loaded && self.notes.is_empty()
    }
}

/// IO-free state container for one notes editor.
#[derive(Debug, Default)]
pub struct NotesState {
    list: ListCache,
    selection: Selection,
    draft: Option<Draft>,
    error: ErrorSlot,
    intent_generation: u64,
    pending_load: Option<LoadTicket>,
    busy: bool,
}

impl NotesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.draft.as_ref()
    }

    pub fn list(&self) -> &ListCache {
        &self.list
    }

    pub fn error(&self) -> Option<ErrorKind> {
        self.error.current()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Returns the id being fetched for the editor, if that fetch is current.
    pub fn loading_id(&self) -> Option<&NoteId> {
        self.pending_load
            .as_ref()
            .filter(|ticket| ticket.generation == self.intent_generation)
            .map(|ticket| &ticket.id)
    }

    pub fn can_save(&self) -> bool {
        !self.busy && self.draft.as_ref().is_some_and(|draft| !draft.is_empty())
    }

    pub fn can_delete(&self) -> bool {
        !self.busy && self.selection.viewing_id().is_some()
    }

    pub fn snapshot(&self) -> NotesSnapshot {
        NotesSnapshot {
            notes: self.list.items().to_vec(),
            list_loaded: self.list.is_loaded(),
            selection: self.selection.clone(),
            draft: self.draft.clone(),
            loading: self.loading_id().cloned(),
            busy: self.busy,
            error: self.error.current(),
            can_save: self.can_save(),
            can_delete: self.can_delete(),
        }
    }

    /// Requests a full re-list, superseding any refresh still in flight.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.list.begin_refresh()
    }

    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: ApiResult<Vec<Note>>,
    ) -> Outcome {
        if !self.list.is_current(&ticket) {
            debug!(
                "event=list_refresh module=state status=stale generation={}",
                ticket.generation()
            );
            return Outcome::Stale;
        }
        match result {
            Ok(notes) => {
                self.list.apply(&ticket, &notes);
                info!(
                    "event=list_refresh module=state status=ok count={}",
                    self.list.len()
                );
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::LoadListFailed, &err),
        }
    }

    /// Starts loading `id` into the editor.
    ///
    /// Returns `None` when the list is loaded and does not contain `id`: such
    /// a note is treated as deleted. Current selection and draft stay in
    /// place until the load completes.
    pub fn begin_select(&mut self, id: NoteId) -> Option<LoadTicket> {
        if self.list.is_loaded() && !self.list.contains(&id) {
            debug!("event=select module=state status=ignored reason=unknown_id id={id}");
            return None;
        }
        let generation = self.bump_generation();
        let ticket = LoadTicket { generation, id };
        self.pending_load = Some(ticket.clone());
        Some(ticket)
    }

    pub fn finish_select(&mut self, ticket: LoadTicket, result: ApiResult<Note>) -> Outcome {
        if ticket.generation != self.intent_generation {
            debug!(
                "event=select module=state status=stale id={} generation={}",
                ticket.id, ticket.generation
            );
            return Outcome::Stale;
        }
        self.pending_load = None;
        match result {
            Ok(note) => {
                // Selection changes here, so mutations issued before it are stale.
                self.bump_generation();
                self.draft = Some(Draft::from_note(&note));
                self.set_selection(Selection::Viewing(ticket.id));
                Outcome::Applied
            }
            Err(err) => self.fail(ErrorKind::LoadNoteFailed, &err),
        }
    }

    /// Starts a fresh draft, replacing any current one.
    pub fn new_draft(&mut self) -> Outcome {
        self.bump_generation();
        self.pending_load = None;
        self.draft = Some(Draft::empty());
        self.set_selection(Selection::Drafting(DraftId::new()));
        Outcome::Applied
    }

    /// Edits the draft buffer. Ignored when nothing is selected.
    pub fn edit(&mut self, field: DraftField, value: &str) -> Outcome {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.set(field, value);
                Outcome::Applied
            }
            None => Outcome::Ignored,
        }
    }

    /// Issues a create (drafting) or update (viewing) request for the draft.
    ///
    /// Returns `None` while busy, when idle, or when title and content are
    /// both empty.
    pub fn begin_save(&mut self) -> Option<SaveTicket> {
        if !self.can_save() {
            return None;
        }
        let input = self.draft.as_ref()?.to_input();
        let request = match &self.selection {
            Selection::Idle => return None,
            Selection::Drafting(_) => SaveRequest::Create(input),
            Selection::Viewing(id) => SaveRequest::Update(id.clone(), input),
        };
        self.busy = true;
        Some(SaveTicket {
            generation: self.intent_generation,
            request,
        })
    }

    pub fn finish_save(&mut self, ticket: SaveTicket, result: ApiResult<Note>) -> MutationDone {
        self.busy = false;
        match result {
            Ok(note) => {
                info!("event=note_save module=state status=ok id={}", note.id);
                self.finish_mutation(ticket.generation)
            }
            Err(err) => MutationDone {
                outcome: self.fail(ErrorKind::SaveFailed, &err),
                refresh: None,
            },
        }
    }

    /// Issues a delete request for the viewed note.
    pub fn begin_delete(&mut self) -> Option<DeleteTicket> {
        if !self.can_delete() {
            return None;
        }
        let id = self.selection.viewing_id()?.clone();
        self.busy = true;
        Some(DeleteTicket {
            generation: self.intent_generation,
            id,
        })
    }

    pub fn finish_delete(&mut self, ticket: DeleteTicket, result: ApiResult<()>) -> MutationDone {
        self.busy = false;
        match result {
            Ok(()) => {
                info!("event=note_delete module=state status=ok id={}", ticket.id);
                self.finish_mutation(ticket.generation)
            }
            Err(err) => MutationDone {
                outcome: self.fail(ErrorKind::DeleteFailed, &err),
                refresh: None,
            },
        }
    }

    /// Returns to `Idle` from any selection, dropping the draft.
    pub fn deselect(&mut self) -> Outcome {
        if self.selection.is_idle() && self.loading_id().is_none() {
            return Outcome::Ignored;
        }
        self.reset_to_idle();
        Outcome::Applied
    }

    /// Abandons an unsaved new note.
    pub fn cancel_draft(&mut self) -> Outcome {
        if !self.selection.is_drafting() {
            return Outcome::Ignored;
        }
        self.reset_to_idle();
        Outcome::Applied
    }

    pub fn dismiss_error(&mut self) -> Outcome {
        if self.error.dismiss() {
            Outcome::Applied
        } else {
            Outcome::Ignored
        }
    }

    fn finish_mutation(&mut self, generation: u64) -> MutationDone {
        let outcome = if generation == self.intent_generation {
            self.reset_to_idle();
            Outcome::Applied
        } else {
            Outcome::Stale
        };
        MutationDone {
            outcome,
            refresh: Some(self.list.begin_refresh()),
        }
    }

    fn reset_to_idle(&mut self) {
        self.bump_generation();
        self.pending_load = None;
        self.draft = None;
        self.set_selection(Selection::Idle);
    }

    fn set_selection(&mut self, next: Selection) {
        match &next {
            Selection::Viewing(id) => debug!(
                "event=selection_change module=state from={} to=viewing id={}",
                self.selection.label(),
                id
            ),
            other => debug!(
                "event=selection_change module=state from={} to={}",
                self.selection.label(),
                other.label()
            ),
        }
        self.selection = next;
    }

    fn bump_generation(&mut self) -> u64 {
        self.intent_generation += 1;
        self.intent_generation
    }

    fn fail(&mut self, kind: ErrorKind, cause: &dyn std::error::Error) -> Outcome {
        warn!(
            "event=action_failed module=state status=error error_code={} error={}",
            kind.code(),
            cause
        );
        self.error.raise(kind);
        Outcome::Failed(kind)
    }
}
