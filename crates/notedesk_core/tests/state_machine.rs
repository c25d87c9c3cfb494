use notedesk_core::state::machine::SaveRequest;
use notedesk_core::{
    ApiError, DraftField, ErrorKind, Note, NoteId, NoteInput, NotesState, Outcome, Selection,
};

fn note(id: &str, title: &str) -> Note {
    Note {
        id: NoteId::new(id),
        title: title.to_string(),
        content: format!("{title} body"),
        created_at: "t1".to_string(),
        updated_at: "t1".to_string(),
    }
}

fn loaded_state(notes: Vec<Note>) -> NotesState {
    let mut state = NotesState::new();
    let ticket = state.begin_refresh();
    assert_eq!(state.finish_refresh(ticket, Ok(notes)), Outcome::Applied);
    state
}

fn server_error() -> ApiError {
    ApiError::Status { status: 500 }
}

#[test]
fn late_load_for_superseded_selection_is_discarded() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);

    let first = state.begin_select(NoteId::new("1")).expect("load should start");
    let second = state.begin_select(NoteId::new("2")).expect("load should start");
    assert_eq!(state.loading_id(), Some(&NoteId::new("2")));

    assert_eq!(state.finish_select(second, Ok(note("2", "two"))), Outcome::Applied);
    assert_eq!(state.finish_select(first, Ok(note("1", "one"))), Outcome::Stale);

    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("2")));
    assert_eq!(state.draft().expect("draft should be present").title, "two");
}

#[test]
fn new_draft_supersedes_pending_load() {
    let mut state = loaded_state(vec![note("1", "one")]);
    let ticket = state.begin_select(NoteId::new("1")).expect("load should start");

    state.new_draft();
    state.edit(DraftField::Title, "fresh");
    assert_eq!(state.loading_id(), None);

    assert_eq!(state.finish_select(ticket, Ok(note("1", "one"))), Outcome::Stale);
    assert!(state.selection().is_drafting());
    assert_eq!(state.draft().expect("draft should be present").title, "fresh");
}

#[test]
fn stale_load_failure_does_not_raise_error() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    let first = state.begin_select(NoteId::new("1")).expect("load should start");
    let _second = state.begin_select(NoteId::new("2")).expect("load should start");

    assert_eq!(state.finish_select(first, Err(server_error())), Outcome::Stale);
    assert_eq!(state.error(), None);
}

#[test]
fn pending_load_keeps_current_selection_until_completion() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    let ticket = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(ticket, Ok(note("1", "one")));

    let pending = state.begin_select(NoteId::new("2")).expect("load should start");
    assert_eq!(pending.id(), &NoteId::new("2"));
    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("1")));
    assert_eq!(state.snapshot().loading, Some(NoteId::new("2")));
}

#[test]
fn save_and_delete_are_refused_while_busy() {
    let mut state = loaded_state(vec![note("1", "one")]);
    let ticket = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(ticket, Ok(note("1", "one")));

    let save = state.begin_save().expect("viewing note with content can save");
    assert!(state.is_busy());
    assert!(!state.snapshot().can_save);
    assert!(state.begin_save().is_none());
    assert!(state.begin_delete().is_none());

    let done = state.finish_save(save, Err(server_error()));
    assert_eq!(done.outcome, Outcome::Failed(ErrorKind::SaveFailed));
    assert!(done.refresh.is_none());
    assert!(!state.is_busy());
    assert!(state.begin_delete().is_some());
}

#[test]
fn save_ticket_targets_create_or_update_by_selection() {
    let mut state = loaded_state(vec![note("1", "one")]);

    state.new_draft();
    state.edit(DraftField::Content, "c");
    let create = state.begin_save().expect("non-empty draft should issue a save ticket");
    assert_eq!(
        create.request(),
        &SaveRequest::Create(NoteInput::new("", "c"))
    );
    state.finish_save(create, Err(server_error()));

    let load = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(load, Ok(note("1", "one")));
    let update = state.begin_save().expect("non-empty draft should issue a save ticket");
    assert_eq!(
        update.request(),
        &SaveRequest::Update(NoteId::new("1"), NoteInput::new("one", "one body"))
    );
}

#[test]
fn save_completing_after_selection_moved_keeps_new_selection() {
    let mut state = loaded_state(vec![note("1", "one")]);
    state.new_draft();
    state.edit(DraftField::Title, "draft a");
    let save = state.begin_save().expect("non-empty draft should issue a save ticket");

    state.new_draft();
    state.edit(DraftField::Title, "draft b");

    let done = state.finish_save(save, Ok(note("2", "draft a")));
    assert_eq!(done.outcome, Outcome::Stale);
    let refresh = done.refresh.expect("remote create happened, list must refresh");
    assert!(state.selection().is_drafting());
    assert_eq!(state.draft().expect("draft should be present").title, "draft b");

    state.finish_refresh(refresh, Ok(vec![note("1", "one"), note("2", "draft a")]));
    assert!(state.list().contains(&NoteId::new("2")));
}

#[test]
fn select_issued_during_delete_wins_over_delete_completion() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    let load = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(load, Ok(note("1", "one")));

    let delete = state.begin_delete().expect("viewed note should issue a delete ticket");
    let late = state.begin_select(NoteId::new("2")).expect("load should start");
    let done = state.finish_delete(delete, Ok(()));
    assert_eq!(done.outcome, Outcome::Stale);

    // The select intent came last, so it still applies.
    assert_eq!(state.finish_select(late, Ok(note("2", "two"))), Outcome::Applied);
    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("2")));
}

#[test]
fn stale_refresh_does_not_overwrite_newer_list() {
    let mut state = NotesState::new();
    let older = state.begin_refresh();
    let newer = state.begin_refresh();

    assert_eq!(state.finish_refresh(newer, Ok(vec![note("1", "one")])), Outcome::Applied);
    assert_eq!(state.finish_refresh(older, Ok(Vec::new())), Outcome::Stale);
    assert_eq!(state.list().len(), 1);
}

#[test]
fn failed_refresh_keeps_previous_list() {
    let mut state = loaded_state(vec![note("1", "one")]);
    let ticket = state.begin_refresh();
    assert_eq!(
        state.finish_refresh(ticket, Err(ApiError::Transport("refused".to_string()))),
        Outcome::Failed(ErrorKind::LoadListFailed)
    );
    assert!(state.list().contains(&NoteId::new("1")));
}

#[test]
fn select_before_first_list_load_is_allowed() {
    let mut state = NotesState::new();
    assert!(state.begin_select(NoteId::new("1")).is_some());
}

#[test]
fn successful_save_invalidates_load_issued_before_it() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    state.new_draft();
    state.edit(DraftField::Title, "draft");
    let load = state.begin_select(NoteId::new("2")).expect("load should start");
    let save = state.begin_save().expect("non-empty draft should issue a save ticket");

    let done = state.finish_save(save, Ok(note("3", "draft")));
    assert_eq!(done.outcome, Outcome::Applied);
    assert_eq!(state.selection(), &Selection::Idle);

    assert_eq!(state.finish_select(load, Ok(note("2", "two"))), Outcome::Stale);
    assert_eq!(state.selection(), &Selection::Idle);
    assert!(state.draft().is_none());
}

#[test]
fn delete_completing_after_newer_load_keeps_loaded_selection() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    let first = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(first, Ok(note("1", "one")));

    let load = state.begin_select(NoteId::new("2")).expect("load should start");
    let delete = state.begin_delete().expect("viewed note should issue a delete ticket");
    assert_eq!(delete.id(), &NoteId::new("1"));

    assert_eq!(state.finish_select(load, Ok(note("2", "two"))), Outcome::Applied);
    let done = state.finish_delete(delete, Ok(()));

    assert_eq!(done.outcome, Outcome::Stale);
    assert!(done.refresh.is_some());
    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("2")));
    assert_eq!(state.draft().expect("draft should be present").title, "two");
}

#[test]
fn save_completing_after_newer_load_keeps_loaded_selection() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    state.new_draft();
    state.edit(DraftField::Title, "draft");

    let load = state.begin_select(NoteId::new("2")).expect("load should start");
    let save = state.begin_save().expect("non-empty draft should issue a save ticket");
    assert_eq!(state.finish_select(load, Ok(note("2", "two"))), Outcome::Applied);

    let done = state.finish_save(save, Ok(note("3", "draft")));
    assert_eq!(done.outcome, Outcome::Stale);
    let refresh = done.refresh.expect("remote create happened, list must refresh");
    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("2")));
    assert!(!state.is_busy());

    state.finish_refresh(
        refresh,
        Ok(vec![note("1", "one"), note("2", "two"), note("3", "draft")]),
    );
    assert_eq!(state.selection(), &Selection::Viewing(NoteId::new("2")));
    assert_eq!(state.list().len(), 3);
}

#[test]
fn failed_load_between_mutation_start_and_completion_keeps_mutation_current() {
    let mut state = loaded_state(vec![note("1", "one"), note("2", "two")]);
    let first = state.begin_select(NoteId::new("1")).expect("load should start");
    state.finish_select(first, Ok(note("1", "one")));

    let load = state.begin_select(NoteId::new("2")).expect("load should start");
    let delete = state.begin_delete().expect("viewed note should issue a delete ticket");
    assert_eq!(
        state.finish_select(load, Err(server_error())),
        Outcome::Failed(ErrorKind::LoadNoteFailed)
    );

    let done = state.finish_delete(delete, Ok(()));
    assert_eq!(done.outcome, Outcome::Applied);
    assert_eq!(state.selection(), &Selection::Idle);
}
