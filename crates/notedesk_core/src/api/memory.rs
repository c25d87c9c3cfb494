//! In-process notes backend.
//!
//! Behaves like the remote API (server-assigned ids and timestamps, 404 on
//! unknown ids) without a network. Used by the CLI `--memory` mode and by
//! tests, which also rely on its failure injection and request log.

use super::{ApiError, ApiResult, NotesApi};
use crate::model::note::{Note, NoteId, NoteInput};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

const NOT_FOUND: u16 = 404;

/// Operation tag used by failure injection and the request log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOp {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// One call observed by `MemoryNotesApi`, failed calls included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub op: ApiOp,
    pub id: Option<NoteId>,
    pub input: Option<NoteInput>,
}

#[derive(Debug, Default)]
struct MemoryState {
    notes: Vec<Note>,
    next_id: u64,
    clock: u64,
    failures: VecDeque<(ApiOp, u16)>,
    requests: Vec<RecordedRequest>,
}

impl MemoryState {
    fn record(
        &mut self,
        op: ApiOp,
        id: Option<&NoteId>,
        input: Option<&NoteInput>,
    ) -> ApiResult<()> {
        self.requests.push(RecordedRequest {
            op,
            id: id.cloned(),
            input: input.cloned(),
        });
        let queued = self
            .failures
            .iter()
            .position(|(failing_op, _)| *failing_op == op);
        match queued.and_then(|index| self.failures.remove(index)) {
            Some((_, status)) => Err(ApiError::Status { status }),
            None => Ok(()),
        }
    }

    fn tick(&mut self) -> String {
        self.clock += 1;
        format!("t{}", self.clock)
    }

    fn position(&self, id: &NoteId) -> ApiResult<usize> {
        self.notes
            .iter()
            .position(|note| &note.id == id)
            .ok_or(ApiError::Status { status: NOT_FOUND })
    }
}

/// Thread-safe in-memory `NotesApi`.
#[derive(Debug, Default)]
pub struct MemoryNotesApi {
    state: Mutex<MemoryState>,
}

impl MemoryNotesApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with `notes`, in list order.
    ///
    /// Generated ids continue after the largest numeric seeded id.
    pub fn with_notes(notes: Vec<Note>) -> Self {
        let next_id = notes
            .iter()
            .filter_map(|note| note.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(MemoryState {
                notes,
                next_id,
                ..MemoryState::default()
            }),
        }
    }

    /// Makes the next call of `op` fail with `status`.
    ///
    /// Multiple queued failures for the same op are consumed in order.
    pub fn fail_next(&self, op: ApiOp, status: u16) {
        self.lock().failures.push_back((op, status));
    }

    /// Returns every call observed so far.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Returns how many calls of `op` were observed.
    pub fn request_count(&self, op: ApiOp) -> usize {
        self.lock()
            .requests
            .iter()
            .filter(|request| request.op == op)
            .count()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Returns the persisted notes, bypassing the request log.
    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotesApi for MemoryNotesApi {
    fn list(&self) -> ApiResult<Vec<Note>> {
        let mut state = self.lock();
        state.record(ApiOp::List, None, None)?;
        Ok(state.notes.clone())
    }

    fn get(&self, id: &NoteId) -> ApiResult<Note> {
        let mut state = self.lock();
        state.record(ApiOp::Get, Some(id), None)?;
        let index = state.position(id)?;
        Ok(state.notes[index].clone())
    }

    fn create(&self, input: &NoteInput) -> ApiResult<Note> {
        let mut state = self.lock();
        state.record(ApiOp::Create, None, Some(input))?;
        state.next_id += 1;
        let id = NoteId::new(state.next_id.to_string());
        let now = state.tick();
        let note = Note {
            id,
            title: input.title.clone(),
            content: input.content.clone(),
            created_at: now.clone(),
            updated_at: now,
        };
        state.notes.push(note.clone());
        Ok(note)
    }

    fn update(&self, id: &NoteId, input: &NoteInput) -> ApiResult<Note> {
        let mut state = self.lock();
        state.record(ApiOp::Update, Some(id), Some(input))?;
        let index = state.position(id)?;
        let now = state.tick();
        let note = &mut state.notes[index];
        note.title = input.title.clone();
        note.content = input.content.clone();
        note.updated_at = now;
        Ok(note.clone())
    }

    fn delete(&self, id: &NoteId) -> ApiResult<()> {
        let mut state = self.lock();
        state.record(ApiOp::Delete, Some(id), None)?;
        let index = state.position(id)?;
        state.notes.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiOp, MemoryNotesApi};
    use crate::api::{ApiError, NotesApi};
    use crate::model::note::{NoteId, NoteInput};

    #[test]
    fn create_assigns_sequential_ids_and_logical_timestamps() {
        let api = MemoryNotesApi::new();
        let first = api.create(&NoteInput::new("a", "")).expect("create should succeed");
        let second = api.create(&NoteInput::new("b", "")).expect("create should succeed");
        assert_eq!(first.id.as_str(), "1");
        assert_eq!(first.created_at, "t1");
        assert_eq!(second.id.as_str(), "2");
        assert_eq!(second.updated_at, "t2");
    }

    #[test]
    fn unknown_id_is_not_found() {
        let api = MemoryNotesApi::new();
        let err = api.get(&NoteId::new("missing")).expect_err("unknown id should fail");
        assert_eq!(err, ApiError::Status { status: 404 });
    }

    #[test]
    fn injected_failure_is_consumed_once() {
        let api = MemoryNotesApi::new();
        api.fail_next(ApiOp::List, 500);
        assert_eq!(api.list().expect_err("list should fail"), ApiError::Status { status: 500 });
        assert!(api.list().expect("list should succeed").is_empty());
        assert_eq!(api.request_count(ApiOp::List), 2);
    }

    #[test]
    fn failed_create_does_not_persist() {
        let api = MemoryNotesApi::new();
        api.fail_next(ApiOp::Create, 503);
        assert!(api.create(&NoteInput::new("a", "")).is_err());
        assert!(api.notes().is_empty());
    }

    #[test]
    fn update_bumps_updated_at_only() {
        let api = MemoryNotesApi::new();
        let created = api.create(&NoteInput::new("a", "")).expect("create should succeed");
        let updated = api
            .update(&created.id, &NoteInput::new("b", "c"))
            .expect("update should succeed");
        assert_eq!(updated.created_at, "t1");
        assert_eq!(updated.updated_at, "t2");
        assert_eq!(updated.title, "b");
    }
}
