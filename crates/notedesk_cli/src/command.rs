//! Line command parsing.
//!
//! One input line maps to one controller intent or one shell-level action.

use notedesk_core::{DraftField, Intent, NoteId};

pub const HELP_TEXT: &str = "\
commands:
  list               reload the note list
  open <id>          load a note into the editor
  new                start a new note
  title <text>       set the draft title
  content <text>     set the draft content
  save               create or update the note
  delete             delete the open note
  close              close the editor (discards edits)
  cancel             abandon a new note
  dismiss            hide the error banner
  show               redraw the screen
  help               print this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Intent),
    Show,
    Help,
    Quit,
}

/// Parses one input line. Blank lines are `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (trimmed, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "list" | "ls" | "refresh" => Command::Intent(Intent::Refresh),
        "open" | "select" => {
            if rest.is_empty() {
                return Err("usage: open <id>".to_string());
            }
            Command::Intent(Intent::Select(NoteId::new(rest)))
        }
        "new" => Command::Intent(Intent::New),
        "title" => Command::Intent(Intent::Edit(DraftField::Title, rest.to_string())),
        "content" => Command::Intent(Intent::Edit(
            DraftField::Content,
            rest.replace("\\n", "\n"),
        )),
        "save" => Command::Intent(Intent::Save),
        "delete" | "rm" => Command::Intent(Intent::Delete),
        "close" => Command::Intent(Intent::Deselect),
        "cancel" => Command::Intent(Intent::Cancel),
        "dismiss" => Command::Intent(Intent::DismissError),
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}
