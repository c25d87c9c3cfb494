//! notedesk command-line front end.
//!
//! # Responsibility
//! - Resolve configuration, start logging and mount the notes controller.
//! - Translate stdin commands into intents and redraw after each one.

mod args;
mod command;
mod render;

use args::Cli;
use clap::Parser;
use command::{parse_line, Command, HELP_TEXT};
use log::warn;
use notedesk_core::{
    init_logging, ApiBackend, ClientConfig, HttpNotesApi, MemoryNotesApi, NotesApi,
    NotesController,
};
use render::{render_outcome, render_snapshot};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match ClientConfig::from_lookup(|key| {
        cli.override_lookup(key, std::env::var(key).ok())
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::from(2);
        }
    };

    // Logging is diagnostics only; the editor stays usable without it.
    if let Err(err) = init_logging(&config) {
        eprintln!("warning: logging disabled: {err}");
    }

    let api: Box<dyn NotesApi> = match config.backend {
        ApiBackend::Memory => Box::new(MemoryNotesApi::new()),
        ApiBackend::Http => match HttpNotesApi::from_config(&config) {
            Ok(api) => Box::new(api),
            Err(err) => {
                eprintln!("cannot reach notes api: {err}");
                return ExitCode::FAILURE;
            }
        },
    };

    let mut controller = NotesController::new(api);
    controller.mount();
    print_screen(&controller);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("event=stdin_read module=cli status=error error={err}");
                break;
            }
        };
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(Command::Help)) => println!("{HELP_TEXT}"),
            Ok(Some(Command::Show)) => print_screen(&controller),
            Ok(Some(Command::Intent(intent))) => {
                let outcome = controller.dispatch(intent);
                if let Some(feedback) = render_outcome(outcome) {
                    println!("{feedback}");
                }
                print_screen(&controller);
            }
            Err(message) => println!("{message}"),
        }
    }

    ExitCode::SUCCESS
}

fn print_screen<A: NotesApi>(controller: &NotesController<A>) {
    print!("{}", render_snapshot(&controller.snapshot()));
    print!("> ");
    let _ = io::stdout().flush();
}
