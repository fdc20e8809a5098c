//! Line-oriented command language used by the console and script runner.

use thiserror::Error;

use crate::error::ValidationError;
use crate::session::{LiveReport, MarkAddedInfo, SessionStatus, SessionStore, StudentRecord};

pub const HELP: &str = "\
Commands:
  start <name>            start a new student or confirm the current name
  add <module> <mark>     add a module mark (0-100); the last word is the mark
  finalize                save the current student to the summary report
  preview                 show the unsaved average and grade
  clear                   discard the current student
  status                  show the current student and modules
  report                  show the summary report
  scale                   show the grading scale
  help                    show this help
  quit                    leave";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("unknown command `{command}`; type `help` for a list")]
    Unknown { command: String },

    #[error("`{command}` takes no arguments")]
    UnexpectedArguments { command: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start { name: String },
    Add { module: String, mark: String },
    Finalize,
    Preview,
    Clear,
    Status,
    Report,
    Scale,
    Help,
    Quit,
}

/// What a command did, for the front end to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Started(SessionStatus),
    MarkAdded(MarkAddedInfo),
    Finalized(StudentRecord),
    Live(LiveReport),
    Cleared,
    Status,
    Report,
    Scale,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    ///
    /// Argument validation is left to the session store, so `add Math`
    /// parses and then fails there with an empty mark.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((line, ""));

        let no_args = |command: &'static str, parsed: Command| {
            if rest.is_empty() {
                Ok(Some(parsed))
            } else {
                Err(CommandError::UnexpectedArguments { command })
            }
        };

        match word.to_ascii_lowercase().as_str() {
            "start" => Ok(Some(Command::Start {
                name: rest.to_string(),
            })),
            "add" => {
                let (module, mark) = rest
                    .rsplit_once(char::is_whitespace)
                    .unwrap_or((rest, ""));
                Ok(Some(Command::Add {
                    module: module.to_string(),
                    mark: mark.to_string(),
                }))
            }
            "finalize" | "finalise" => no_args("finalize", Command::Finalize),
            "preview" => no_args("preview", Command::Preview),
            "clear" => no_args("clear", Command::Clear),
            "status" => no_args("status", Command::Status),
            "report" => no_args("report", Command::Report),
            "scale" => no_args("scale", Command::Scale),
            "help" | "?" => Ok(Some(Command::Help)),
            "quit" | "exit" => Ok(Some(Command::Quit)),
            _ => Err(CommandError::Unknown {
                command: word.to_string(),
            }),
        }
    }

    /// Runs the command against `store`.
    pub fn apply(self, store: &mut SessionStore) -> Result<Outcome, ValidationError> {
        match self {
            Command::Start { name } => store.start_session(&name).map(Outcome::Started),
            Command::Add { module, mark } => store.add_mark(&module, &mark).map(Outcome::MarkAdded),
            Command::Finalize => store.finalize().map(Outcome::Finalized),
            Command::Preview => store.preview_live_report().map(Outcome::Live),
            Command::Clear => {
                store.clear_session();
                Ok(Outcome::Cleared)
            }
            Command::Status => Ok(Outcome::Status),
            Command::Report => Ok(Outcome::Report),
            Command::Scale => Ok(Outcome::Scale),
            Command::Help => Ok(Outcome::Help),
            Command::Quit => Ok(Outcome::Quit),
        }
    }
}
