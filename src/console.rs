//! Line-driven front end shared by the interactive console and script runner.
//!
//! Reads commands from any [`BufRead`], applies them to a [`SessionStore`],
//! and writes the rendered results to any [`Write`].

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{debug, info, warn};

use crate::command::{Command, HELP, Outcome};
use crate::output::{print_pretty, report_json, write_csv};
use crate::render;
use crate::report::{GradeBucket, SummaryReport};
use crate::session::SessionStore;

/// Whether a name switch that drops unsaved marks needs a `y` first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Style {
    pub color: bool,
}

/// Reads commands line by line until input ends or `quit` is entered.
///
/// In [`Mode::Interactive`] a `start` that would discard unsaved marks asks
/// for confirmation on the next input line; anything but `y`, including end
/// of input, keeps the current session. In [`Mode::Script`] the switch goes
/// ahead with a warning.
pub fn run_lines<R: BufRead, W: Write>(
    store: &mut SessionStore,
    input: R,
    out: &mut W,
    mode: Mode,
    style: Style,
) -> Result<()> {
    let mut lines = input.lines();
    let mut line_no = 0usize;

    loop {
        if mode == Mode::Interactive {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        line_no += 1;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = line_no, error = %e, "Unrecognised command");
                writeln!(out, "Error: {e}")?;
                continue;
            }
        };

        if let Command::Start { ref name } = command
            && let Some(dropped) = store.pending_discard(name)
        {
            let prompt = format!(
                "{} unsaved mark(s) for {} will be discarded.",
                dropped.module_count, dropped.student_name
            );
            match mode {
                Mode::Interactive => {
                    write!(out, "{prompt} Continue? [y/N] ")?;
                    out.flush()?;
                    let answer = lines.next().transpose()?.unwrap_or_default();
                    if !answer.trim().eq_ignore_ascii_case("y") {
                        writeln!(out, "Kept the current session.")?;
                        continue;
                    }
                }
                Mode::Script => writeln!(out, "Warning: {prompt}")?,
            }
        }

        match command.apply(store) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => show(store, &outcome, out, style)?,
            Err(e) => {
                debug!(line = line_no, error = %e, "Command rejected");
                writeln!(out, "Input Error: {e}")?;
            }
        }
    }

    Ok(())
}

/// Writes the user-facing text for one command outcome.
pub fn show<W: Write>(
    store: &SessionStore,
    outcome: &Outcome,
    out: &mut W,
    style: Style,
) -> Result<()> {
    match outcome {
        Outcome::Started(status) => {
            if status.started {
                writeln!(out, "Starting module entry for {}.", status.student_name)?;
            }
            writeln!(out, "{}", render::session_labels(store))?;
        }
        Outcome::MarkAdded(info) => {
            if let Some(notice) = render::overwrite_notice(info) {
                writeln!(out, "Warning: {notice}")?;
            }
            writeln!(out, "{}", render::session_labels(store))?;
        }
        Outcome::Finalized(record) => {
            let grade = render::paint(
                &record.grade,
                GradeBucket::classify(&record.grade),
                style.color,
            );
            writeln!(
                out,
                "Record saved for {}: Average: {:.2}, Grade: {}",
                record.student_name, record.average, grade
            )?;
        }
        Outcome::Live(live) => writeln!(out, "{}", render::live_report(live))?,
        Outcome::Cleared | Outcome::Status => {
            writeln!(out, "{}", render::session_labels(store))?;
        }
        Outcome::Report => write!(
            out,
            "{}",
            render::summary_table(&SummaryReport::build(store), style.color)
        )?,
        Outcome::Scale => write!(
            out,
            "{}",
            render::scale_legend(&store.policy().boundaries().scale())
        )?,
        Outcome::Help => writeln!(out, "{HELP}")?,
        Outcome::Quit => {}
    }
    Ok(())
}

/// Prints and exports the summary report once input is done.
pub fn finish<W: Write>(
    store: &SessionStore,
    out: &mut W,
    csv: Option<&str>,
    json: bool,
    style: Style,
) -> Result<()> {
    let report = SummaryReport::build(store);
    print_pretty(&report);

    if let Some(session) = store.active()
        && !session.marks.is_empty()
    {
        warn!(
            student = %session.student_name,
            modules = session.marks.len(),
            "Exiting with unsaved marks"
        );
    }

    if json {
        writeln!(out, "{}", report_json(&report)?)?;
    } else {
        write!(out, "{}", render::summary_table(&report, style.color))?;
    }

    if let Some(path) = csv {
        write_csv(path, &report.rows)?;
    }

    info!(records = report.rows.len(), "Finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str, mode: Mode) -> (SessionStore, String) {
        let mut store = SessionStore::default();
        let mut out = Vec::new();
        run_lines(&mut store, input.as_bytes(), &mut out, mode, Style::default()).unwrap();
        (store, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_declined_switch_keeps_session() {
        let (store, out) = run("start Alice\nadd Math 80\nstart Bob\nn\n", Mode::Interactive);

        let active = store.active().unwrap();
        assert_eq!(active.student_name, "Alice");
        assert_eq!(active.marks.get("Math"), Some(80.0));
        assert!(out.contains("1 unsaved mark(s) for Alice will be discarded. Continue? [y/N] "));
        assert!(out.contains("Kept the current session."));
    }

    #[test]
    fn test_accepted_switch_drops_marks() {
        let (store, out) = run("start Alice\nadd Math 80\nstart Bob\ny\n", Mode::Interactive);

        let active = store.active().unwrap();
        assert_eq!(active.student_name, "Bob");
        assert!(active.marks.is_empty());
        assert!(out.contains("Starting module entry for Bob."));
    }

    #[test]
    fn test_end_of_input_at_prompt_keeps_session() {
        let (store, out) = run("start Alice\nadd Math 80\nstart Bob", Mode::Interactive);

        let active = store.active().unwrap();
        assert_eq!(active.student_name, "Alice");
        assert_eq!(active.marks.len(), 1);
        assert!(out.contains("Kept the current session."));
    }

    #[test]
    fn test_script_switch_warns_and_proceeds() {
        let (store, out) = run("start Alice\nadd Math 80\nstart Bob\n", Mode::Script);

        assert!(out.contains("Warning: 1 unsaved mark(s) for Alice will be discarded.\n"));
        assert!(!out.contains("Continue?"));
        assert!(!out.contains("> "));
        assert_eq!(store.active().unwrap().student_name, "Bob");
    }

    #[test]
    fn test_switch_without_marks_does_not_prompt() {
        let (store, out) = run("start Alice\nstart Bob\n", Mode::Interactive);

        assert!(!out.contains("Continue?"));
        assert_eq!(store.active().unwrap().student_name, "Bob");
    }

    #[test]
    fn test_errors_are_reported_and_loop_continues() {
        let (store, out) = run(
            "frobnicate\nadd Math 80\nstart Zoe\nadd Quiz 101\nadd Quiz 60\nfinalize\nquit\nstart Ann\n",
            Mode::Script,
        );

        assert!(out.contains("Error: unknown command `frobnicate`"));
        assert!(out.contains("Input Error: no student session started"));
        assert!(out.contains("Input Error: mark 101 is outside the valid range 0-100"));
        assert!(out.contains("Record saved for Zoe: Average: 60.00, Grade: D"));
        assert!(store.active().is_none());
        assert_eq!(store.list_records().len(), 1);
    }

    #[test]
    fn test_finish_writes_table() {
        let (store, _) = run("start Zoe\nadd Quiz1 55\nadd Quiz2 65\nfinalize\n", Mode::Script);
        let mut out = Vec::new();

        finish(&store, &mut out, None, false, Style::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Zoe            2         60.00     D"));
        assert!(text.contains("Grading Scale:"));
    }
}
