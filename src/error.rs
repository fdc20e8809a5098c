//! Error types for the grading core.
//!
//! Every variant is a local, recoverable failure. A call that returns one of
//! these leaves the session and roster exactly as they were before the call.

use thiserror::Error;

use crate::grading::{MARK_MAX, MARK_MIN};

/// Input problems reported by [`SessionStore`](crate::session::SessionStore).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("please enter the student's name first")]
    EmptyName,

    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("mark must be a numeric value, got `{input}`")]
    NotNumeric { input: String },

    #[error("mark {value} is outside the valid range {}-{}", MARK_MIN, MARK_MAX)]
    OutOfRange { value: f64 },

    #[error("no student session started; start or confirm a student name first")]
    NoActiveSession,

    #[error("add at least one module mark before finalizing")]
    NoMarks,
}

/// Problems with a grade boundary table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BoundaryError {
    #[error("grade boundary table is empty")]
    Empty,

    #[error("grade letter cannot be blank")]
    BlankLetter,

    #[error("grade `{letter}` appears more than once")]
    DuplicateLetter { letter: String },

    #[error(
        "minimum for grade `{letter}` must be between {} and {}, got {minimum}",
        MARK_MIN,
        MARK_MAX
    )]
    InvalidMinimum { letter: String, minimum: f64 },

    #[error("grades `{first}` and `{second}` share the minimum {minimum}")]
    DuplicateMinimum {
        first: String,
        second: String,
        minimum: f64,
    },

    #[error("lowest grade boundary must be 0, got {lowest}")]
    MissingFloor { lowest: f64 },
}
