use crate::grading::boundary::GradeBoundaries;
use crate::grading::utility::mean;
use crate::grading::{MARK_MAX, MARK_MIN};
use crate::session::ModuleMarks;

/// Grade for averages above the top of the mark range (bonus marks).
pub const OVERSHOOT_GRADE: &str = "A+";

/// Grade reported when there is nothing to grade.
pub const NOT_AVAILABLE: &str = "N/A";

/// Grade given to averages below the bottom of the mark range.
const UNDERSHOOT_GRADE: &str = "F";

/// Turns module marks into an average and the average into a letter grade.
#[derive(Debug, Clone, Default)]
pub struct GradingPolicy {
    boundaries: GradeBoundaries,
}

impl GradingPolicy {
    pub fn new(boundaries: GradeBoundaries) -> Self {
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &GradeBoundaries {
        &self.boundaries
    }

    /// Unweighted mean of every mark. An empty set averages to 0.0.
    pub fn average(&self, marks: &ModuleMarks) -> f64 {
        mean(marks.values())
    }

    /// Converts an average into a letter grade.
    ///
    /// | Input                 | Grade                          |
    /// |-----------------------|--------------------------------|
    /// | absent                | N/A                            |
    /// | > 100                 | A+                             |
    /// | < 0                   | F                              |
    /// | otherwise             | first band with minimum <= avg |
    ///
    /// Band minimums are inclusive, so an average sitting exactly on a
    /// boundary earns the higher grade.
    pub fn grade(&self, average: Option<f64>) -> String {
        let Some(avg) = average else {
            return NOT_AVAILABLE.into();
        };

        match avg {
            avg if avg > MARK_MAX => OVERSHOOT_GRADE.into(),
            avg if avg < MARK_MIN => UNDERSHOOT_GRADE.into(),
            avg => self
                .boundaries
                .iter()
                .find(|band| avg >= band.minimum)
                .map(|band| band.letter.clone())
                .unwrap_or_else(|| NOT_AVAILABLE.into()),
        }
    }
}
