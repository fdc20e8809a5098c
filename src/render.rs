//! Text layout for the terminal front end.
//!
//! Nothing here computes grades; it only lays out values produced by the
//! session store and [`SummaryReport`].

use colored::Colorize;
use std::fmt::Write;

use crate::grading::boundary::ScaleBand;
use crate::report::{GradeBucket, SummaryReport};
use crate::session::{LiveReport, MarkAddedInfo, SessionStore};

const RULE_WIDTH: usize = 45;

/// `Student: {name} | Modules: {count}`, or `N/A` with no active session.
pub fn status_label(store: &SessionStore) -> String {
    match store.active() {
        Some(session) => format!(
            "Student: {} | Modules: {}",
            session.student_name,
            session.marks.len()
        ),
        None => "Student: N/A | Modules: 0".to_string(),
    }
}

/// `Current Modules: {comma-joined names}`.
pub fn module_label<S: AsRef<str>>(names: &[S]) -> String {
    let joined: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    format!("Current Modules: {}", joined.join(", "))
}

/// Both status lines for the active session.
pub fn session_labels(store: &SessionStore) -> String {
    let names: Vec<&str> = store
        .active()
        .map(|s| s.marks.names().collect())
        .unwrap_or_default();
    format!("{}\n{}", status_label(store), module_label(names.as_slice()))
}

pub fn overwrite_notice(info: &MarkAddedInfo) -> Option<String> {
    info.previous.map(|old| {
        format!(
            "Module '{}' updated. Mark overwritten from {} to {}.",
            info.module, old, info.mark
        )
    })
}

pub fn live_report(live: &LiveReport) -> String {
    format!(
        "Live grade for {}\nAverage Score: {:.2}\nAssigned Grade: {}\n\n\
         Note: This record has NOT been saved to the summary report yet.",
        live.student_name, live.average, live.grade
    )
}

/// Colours `text` by bucket: green high, yellow mid, red low.
pub fn paint(text: &str, bucket: GradeBucket, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match bucket {
        GradeBucket::High => text.bright_green().to_string(),
        GradeBucket::Mid => text.yellow().to_string(),
        GradeBucket::Low => text.red().to_string(),
    }
}

/// `   A: 90 - 100` lines under a `Grading Scale:` heading.
pub fn scale_legend(scale: &[ScaleBand]) -> String {
    let mut out = String::from("Grading Scale:\n");
    for band in scale {
        let _ = writeln!(out, "   {}: {} - {}", band.letter, band.lower, band.upper);
    }
    out
}

/// Fixed-width roster table followed by the grading scale.
pub fn summary_table(report: &SummaryReport, color: bool) -> String {
    let mut out = String::new();

    if report.is_empty() {
        out.push_str("No student data entered yet.\n");
    } else {
        let _ = writeln!(
            out,
            "{:<15}{:<10}{:<10}{:<8}",
            "Student", "Modules", "Average", "Grade"
        );
        let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));
        for row in &report.rows {
            let grade = paint(&format!("{:<8}", row.grade), row.bucket, color);
            let _ = writeln!(
                out,
                "{:<15}{:<10}{:<10.2}{}",
                row.student, row.modules, row.average, grade
            );
        }
    }

    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    out.push_str(&scale_legend(&report.scale));
    out
}
