//! Structured summary of the roster for rendering and export.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grading::boundary::ScaleBand;
use crate::session::{SessionStore, StudentRecord};

/// Display class of a grade, used to colour the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeBucket {
    High,
    Mid,
    Low,
}

impl GradeBucket {
    /// `A`/`A+` are high, `B`/`C` are mid, everything else is low.
    pub fn classify(grade: &str) -> Self {
        match grade {
            "A" | "A+" => GradeBucket::High,
            "B" | "C" => GradeBucket::Mid,
            _ => GradeBucket::Low,
        }
    }
}

/// One roster line of the summary report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub student: String,
    pub modules: usize,
    pub average: f64,
    pub grade: String,
    pub bucket: GradeBucket,
}

impl From<&StudentRecord> for ReportRow {
    fn from(record: &StudentRecord) -> Self {
        Self {
            student: record.student_name.clone(),
            modules: record.module_count(),
            average: record.average,
            grade: record.grade.clone(),
            bucket: GradeBucket::classify(&record.grade),
        }
    }
}

/// Snapshot of the roster plus the grading-scale legend.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<ReportRow>,
    pub scale: Vec<ScaleBand>,
}

impl SummaryReport {
    pub fn build(store: &SessionStore) -> Self {
        Self {
            generated_at: Utc::now(),
            rows: store.roster().iter().map(ReportRow::from).collect(),
            scale: store.policy().boundaries().scale(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_buckets() {
        assert_eq!(GradeBucket::classify("A+"), GradeBucket::High);
        assert_eq!(GradeBucket::classify("A"), GradeBucket::High);
        assert_eq!(GradeBucket::classify("B"), GradeBucket::Mid);
        assert_eq!(GradeBucket::classify("C"), GradeBucket::Mid);
        assert_eq!(GradeBucket::classify("D"), GradeBucket::Low);
        assert_eq!(GradeBucket::classify("F"), GradeBucket::Low);
    }

    #[test]
    fn test_build_follows_roster_order() {
        let mut store = SessionStore::default();
        for (name, mark) in [("Zoe", "95"), ("Adam", "72")] {
            store.start_session(name).unwrap();
            store.add_mark("Final", mark).unwrap();
            store.finalize().unwrap();
        }

        let report = SummaryReport::build(&store);

        let rows: Vec<_> = report
            .rows
            .iter()
            .map(|r| (r.student.as_str(), r.grade.as_str(), r.bucket))
            .collect();
        assert_eq!(
            rows,
            [("Zoe", "A", GradeBucket::High), ("Adam", "C", GradeBucket::Mid)]
        );
        assert_eq!(report.scale.len(), 5);
    }

    #[test]
    fn test_build_empty_roster() {
        let report = SummaryReport::build(&SessionStore::default());
        assert!(report.is_empty());
        assert_eq!(report.scale[0].upper, 100.0);
    }

    #[test]
    fn test_bucket_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&GradeBucket::Mid).unwrap(),
            r#""mid""#
        );
    }
}
