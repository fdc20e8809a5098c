//! Values handed back to the presentation layer by the session store.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::session::ModuleMarks;

/// The single in-progress, unsaved student entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub student_name: String,
    pub marks: ModuleMarks,
}

/// Marks that were thrown away because a different student was started.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscardedSession {
    pub student_name: String,
    pub module_count: usize,
}

/// Result of starting or confirming a student session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    pub student_name: String,
    pub module_count: usize,
    /// `false` when the name matched the active session and nothing changed.
    pub started: bool,
    pub discarded: Option<DiscardedSession>,
}

/// Result of a successful mark write.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkAddedInfo {
    pub module: String,
    pub mark: f64,
    /// Mark replaced by this write, if the module already had one.
    pub previous: Option<f64>,
    pub module_count: usize,
    pub module_names: Vec<String>,
}

impl MarkAddedInfo {
    pub fn was_overwrite(&self) -> bool {
        self.previous.is_some()
    }
}

/// Unsaved average and grade for the active session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveReport {
    pub student_name: String,
    pub module_count: usize,
    pub average: f64,
    pub grade: String,
}

/// A finalized student entry in the roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub student_name: String,
    pub marks: ModuleMarks,
    pub average: f64,
    pub grade: String,
    pub finalized_at: DateTime<Utc>,
}

impl StudentRecord {
    pub fn module_count(&self) -> usize {
        self.marks.len()
    }
}
