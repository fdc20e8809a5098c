use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::grading::GradingPolicy;
use crate::session::{
    ActiveSession, DiscardedSession, LiveReport, MarkAddedInfo, ModuleMarks, Roster,
    SessionStatus, StudentRecord,
};

/// Owns the active student session and the roster of finalized records.
///
/// Lifecycle of one session:
///
/// ```text
/// [NoSession] --start--> [NamedNoMarks] --add--> [NamedWithMarks] --add--> (self)
/// [NamedWithMarks] --finalize--> [NoSession]
/// [Named*] --clear--> [NoSession]
/// [Named*] --start(other name)--> [NamedNoMarks]   unsaved marks are dropped
/// ```
///
/// Every failing call leaves both the session and the roster untouched.
#[derive(Debug, Default)]
pub struct SessionStore {
    policy: GradingPolicy,
    active: Option<ActiveSession>,
    roster: Roster,
}

impl SessionStore {
    pub fn new(policy: GradingPolicy) -> Self {
        Self {
            policy,
            active: None,
            roster: Roster::new(),
        }
    }

    pub fn policy(&self) -> &GradingPolicy {
        &self.policy
    }

    pub fn active(&self) -> Option<&ActiveSession> {
        self.active.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Reports the unsaved marks that `start_session(raw_name)` would drop,
    /// so a caller can ask for confirmation first.
    pub fn pending_discard(&self, raw_name: &str) -> Option<DiscardedSession> {
        let name = raw_name.trim();
        if name.is_empty() {
            return None;
        }
        self.active
            .as_ref()
            .filter(|s| s.student_name != name && !s.marks.is_empty())
            .map(|s| DiscardedSession {
                student_name: s.student_name.clone(),
                module_count: s.marks.len(),
            })
    }

    /// Starts a session for `raw_name`, or confirms the current one.
    ///
    /// A name that differs from the active session's begins a fresh session
    /// and silently drops any unsaved marks; the dropped session is reported
    /// in [`SessionStatus::discarded`]. The same name is a no-op.
    #[tracing::instrument(skip(self))]
    pub fn start_session(&mut self, raw_name: &str) -> Result<SessionStatus, ValidationError> {
        let name = raw_name.trim();
        if name.is_empty() {
            debug!("Rejected blank student name");
            return Err(ValidationError::EmptyName);
        }

        if let Some(session) = self.active.as_ref().filter(|s| s.student_name == name) {
            debug!(modules = session.marks.len(), "Session confirmed");
            return Ok(SessionStatus {
                student_name: session.student_name.clone(),
                module_count: session.marks.len(),
                started: false,
                discarded: None,
            });
        }

        let discarded = self.pending_discard(name);
        if let Some(ref dropped) = discarded {
            warn!(
                previous = %dropped.student_name,
                modules = dropped.module_count,
                "Discarding unsaved marks"
            );
        }

        self.active = Some(ActiveSession {
            student_name: name.to_string(),
            marks: ModuleMarks::new(),
        });
        info!(student = name, "Session started");

        Ok(SessionStatus {
            student_name: name.to_string(),
            module_count: 0,
            started: true,
            discarded,
        })
    }

    /// Validates and records one module mark for the active session.
    ///
    /// An existing module is overwritten; the old value comes back in
    /// [`MarkAddedInfo::previous`].
    #[tracing::instrument(skip(self))]
    pub fn add_mark(
        &mut self,
        raw_module: &str,
        raw_mark: &str,
    ) -> Result<MarkAddedInfo, ValidationError> {
        let session = self.active.as_mut().ok_or(ValidationError::NoActiveSession)?;

        let module = raw_module.trim();
        let mark_input = raw_mark.trim();
        if module.is_empty() {
            return Err(ValidationError::EmptyField {
                field: "module name",
            });
        }
        if mark_input.is_empty() {
            return Err(ValidationError::EmptyField { field: "mark" });
        }

        let mark = parse_mark(mark_input)?;
        let previous = session.marks.insert(module, mark).inspect_err(|e| {
            debug!(error = %e, "Rejected mark");
        })?;

        if let Some(old) = previous {
            warn!(module, old, new = mark, "Mark overwritten");
        } else {
            debug!(module, mark, "Mark added");
        }

        Ok(MarkAddedInfo {
            module: module.to_string(),
            mark,
            previous,
            module_count: session.marks.len(),
            module_names: session.marks.names().map(str::to_string).collect(),
        })
    }

    /// Grades the active session, writes it to the roster and ends the
    /// session. A record for the same name is replaced outright.
    pub fn finalize(&mut self) -> Result<StudentRecord, ValidationError> {
        let session = self.active.as_ref().ok_or(ValidationError::NoActiveSession)?;
        if session.marks.is_empty() {
            return Err(ValidationError::NoMarks);
        }

        let average = self.policy.average(&session.marks);
        let record = StudentRecord {
            student_name: session.student_name.clone(),
            marks: session.marks.clone(),
            average,
            grade: self.policy.grade(Some(average)),
            finalized_at: Utc::now(),
        };

        let superseded = self.roster.upsert(record.clone()).is_some();
        self.active = None;

        info!(
            student = %record.student_name,
            modules = record.module_count(),
            average = record.average,
            grade = %record.grade,
            superseded,
            "Record finalized"
        );

        Ok(record)
    }

    /// Unsaved average and grade for the active session. Mutates nothing.
    pub fn preview_live_report(&self) -> Result<LiveReport, ValidationError> {
        let session = self
            .active
            .as_ref()
            .filter(|s| !s.marks.is_empty())
            .ok_or(ValidationError::NoActiveSession)?;

        let average = self.policy.average(&session.marks);
        Ok(LiveReport {
            student_name: session.student_name.clone(),
            module_count: session.marks.len(),
            average,
            grade: self.policy.grade(Some(average)),
        })
    }

    /// Drops the active session. The roster is untouched.
    pub fn clear_session(&mut self) {
        if let Some(session) = self.active.take() {
            info!(
                student = %session.student_name,
                modules = session.marks.len(),
                "Session cleared"
            );
        }
    }

    /// Finalized records in the order they were first finalized.
    pub fn list_records(&self) -> Vec<&StudentRecord> {
        self.roster.iter().collect()
    }
}

/// Parses a trimmed mark. Anything that is not a finite number is rejected.
fn parse_mark(input: &str) -> Result<f64, ValidationError> {
    input
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .ok_or_else(|| {
            debug!(input, "Rejected non-numeric mark");
            ValidationError::NotNumeric {
                input: input.to_string(),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, marks: &[(&str, &str)]) -> SessionStore {
        let mut store = SessionStore::default();
        store.start_session(name).unwrap();
        for (module, mark) in marks {
            store.add_mark(module, mark).unwrap();
        }
        store
    }

    #[test]
    fn test_start_session_rejects_blank_name() {
        let mut store = SessionStore::default();
        assert_eq!(store.start_session("   "), Err(ValidationError::EmptyName));
        assert!(store.active().is_none());
    }

    #[test]
    fn test_start_session_trims_name() {
        let mut store = SessionStore::default();
        let status = store.start_session("  Alice  ").unwrap();
        assert_eq!(status.student_name, "Alice");
        assert_eq!(status.module_count, 0);
        assert!(status.started);
    }

    #[test]
    fn test_start_session_same_name_is_idempotent() {
        let mut store = store_with("Alice", &[("Math", "80")]);

        let status = store.start_session(" Alice").unwrap();

        assert!(!status.started);
        assert_eq!(status.module_count, 1);
        assert_eq!(store.active().unwrap().marks.get("Math"), Some(80.0));
    }

    #[test]
    fn test_start_session_other_name_discards_marks() {
        let mut store = store_with("Alice", &[("Math", "80")]);
        assert_eq!(
            store.pending_discard("Bob"),
            Some(DiscardedSession {
                student_name: "Alice".to_string(),
                module_count: 1,
            })
        );

        let status = store.start_session("Bob").unwrap();

        assert_eq!(status.discarded.unwrap().student_name, "Alice");
        let active = store.active().unwrap();
        assert_eq!(active.student_name, "Bob");
        assert!(active.marks.is_empty());
        assert!(store.list_records().is_empty());
    }

    #[test]
    fn test_pending_discard_ignores_empty_sessions() {
        let store = store_with("Alice", &[]);
        assert_eq!(store.pending_discard("Bob"), None);
        assert_eq!(store.pending_discard("Alice"), None);
        assert_eq!(store.pending_discard(""), None);
    }

    #[test]
    fn test_add_mark_requires_session() {
        let mut store = SessionStore::default();
        assert_eq!(
            store.add_mark("Math", "80"),
            Err(ValidationError::NoActiveSession)
        );
    }

    #[test]
    fn test_add_mark_rejects_empty_fields() {
        let mut store = store_with("Alice", &[]);
        assert_eq!(
            store.add_mark("  ", "80"),
            Err(ValidationError::EmptyField {
                field: "module name"
            })
        );
        assert_eq!(
            store.add_mark("Math", ""),
            Err(ValidationError::EmptyField { field: "mark" })
        );
    }

    #[test]
    fn test_add_mark_rejects_bad_marks_without_mutation() {
        let mut store = store_with("Alice", &[("Math", "80")]);

        assert_eq!(
            store.add_mark("Math", "101"),
            Err(ValidationError::OutOfRange { value: 101.0 })
        );
        assert_eq!(
            store.add_mark("Art", "-1"),
            Err(ValidationError::OutOfRange { value: -1.0 })
        );
        assert_eq!(
            store.add_mark("Art", "abc"),
            Err(ValidationError::NotNumeric {
                input: "abc".to_string()
            })
        );
        assert!(matches!(
            store.add_mark("Art", "NaN"),
            Err(ValidationError::NotNumeric { .. })
        ));
        assert!(matches!(
            store.add_mark("Art", "inf"),
            Err(ValidationError::NotNumeric { .. })
        ));

        let marks = &store.active().unwrap().marks;
        assert_eq!(marks.len(), 1);
        assert_eq!(marks.get("Math"), Some(80.0));
    }

    #[test]
    fn test_add_mark_overwrite_reports_previous() {
        let mut store = store_with("Alice", &[("Math", "80"), ("Eng", "90")]);

        let info = store.add_mark("Math", " 75.5 ").unwrap();

        assert!(info.was_overwrite());
        assert_eq!(info.previous, Some(80.0));
        assert_eq!(info.mark, 75.5);
        assert_eq!(info.module_count, 2);
        assert_eq!(info.module_names, ["Math", "Eng"]);
    }

    #[test]
    fn test_finalize_writes_record_and_ends_session() {
        let mut store = store_with("Alice", &[("Math", "80"), ("Eng", "90")]);

        let record = store.finalize().unwrap();

        assert_eq!(record.average, 85.0);
        assert_eq!(record.grade, "B");
        assert!(store.active().is_none());
        assert_eq!(
            store.preview_live_report(),
            Err(ValidationError::NoActiveSession)
        );
        assert_eq!(store.roster().get("Alice").unwrap().average, 85.0);
    }

    #[test]
    fn test_finalize_requires_session_and_marks() {
        let mut store = SessionStore::default();
        assert_eq!(store.finalize(), Err(ValidationError::NoActiveSession));

        store.start_session("Alice").unwrap();
        assert_eq!(store.finalize(), Err(ValidationError::NoMarks));
        assert!(store.active().is_some());
    }

    #[test]
    fn test_refinalize_replaces_record() {
        let mut store = store_with("Alice", &[("Math", "80"), ("Eng", "90")]);
        store.finalize().unwrap();

        store.start_session("Alice").unwrap();
        store.add_mark("Art", "50").unwrap();
        store.finalize().unwrap();

        let records = store.list_records();
        assert_eq!(records.len(), 1);
        let alice = records[0];
        assert_eq!(alice.module_count(), 1);
        assert_eq!(alice.marks.get("Math"), None);
        assert_eq!(alice.average, 50.0);
        assert_eq!(alice.grade, "F");
    }

    #[test]
    fn test_preview_is_read_only() {
        let store = store_with("Alice", &[("Math", "80"), ("Eng", "90")]);

        let live = store.preview_live_report().unwrap();

        assert_eq!(live.average, 85.0);
        assert_eq!(live.grade, "B");
        assert_eq!(live.module_count, 2);
        assert!(store.list_records().is_empty());
        assert_eq!(store.active().unwrap().marks.len(), 2);
    }

    #[test]
    fn test_preview_requires_marks() {
        let store = store_with("Alice", &[]);
        assert_eq!(
            store.preview_live_report(),
            Err(ValidationError::NoActiveSession)
        );
    }

    #[test]
    fn test_clear_session_keeps_roster() {
        let mut store = store_with("Alice", &[("Math", "80")]);
        store.finalize().unwrap();
        store.start_session("Bob").unwrap();
        store.add_mark("Math", "70").unwrap();

        store.clear_session();
        store.clear_session();

        assert!(store.active().is_none());
        assert_eq!(store.list_records().len(), 1);
    }
}
