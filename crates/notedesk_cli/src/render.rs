//! Plain-text rendering of controller snapshots.

use notedesk_core::{NotesSnapshot, Outcome, Selection};
use std::fmt::Write;

/// Renders list, editor panel and error banner.
pub fn render_snapshot(snapshot: &NotesSnapshot) -> String {
    let mut out = String::new();

    if let Some(message) = snapshot.error_message() {
        let _ = writeln!(out, "[!] {message} (type `dismiss` to hide)");
    }

    let _ = writeln!(out, "== notes ==");
    if !snapshot.list_loaded {
        let _ = writeln!(out, "  (not loaded)");
    } else if snapshot.is_empty_state() {
        let _ = writeln!(out, "  No notes yet. Type `new` to create one.");
    }
    for note in &snapshot.notes {
        let marker = if snapshot.selection.viewing_id() == Some(&note.id) {
            '>'
        } else {
            ' '
        };
        let _ = write!(out, "{marker} [{}] {}", note.id, note.display_title());
        if let Some(preview) = &note.preview {
            let _ = write!(out, " - {preview}");
        }
        let _ = writeln!(out);
    }

    if let Some(id) = &snapshot.loading {
        let _ = writeln!(out, "loading note {id}...");
    }

    match (&snapshot.selection, &snapshot.draft) {
        (Selection::Idle, _) | (_, None) => {
            let _ = writeln!(out, "== editor: nothing selected ==");
        }
        (selection, Some(draft)) => {
            let heading = match selection {
                Selection::Viewing(id) => format!("note {id}"),
                _ => "new note".to_string(),
            };
            let _ = writeln!(out, "== editor: {heading} ==");
            let _ = writeln!(out, "title:   {}", draft.title);
            let _ = writeln!(out, "content: {}", draft.content.replace('\n', "\n         "));
            let mut actions = Vec::new();
            if snapshot.can_save {
                actions.push("save");
            }
            if snapshot.can_delete {
                actions.push("delete");
            }
            actions.push("close");
            let _ = writeln!(out, "actions: {}", actions.join(", "));
        }
    }

    out
}

/// One-line feedback for intents that did not apply.
pub fn render_outcome(outcome: Outcome) -> Option<&'static str> {
    match outcome {
        Outcome::Applied | Outcome::Failed(_) => None,
        Outcome::Ignored => Some("nothing to do"),
        Outcome::Stale => Some("result arrived too late and was dropped"),
    }
}
