//! Averaging and letter-grade assignment.
//!
//! [`GradingPolicy`] is stateless apart from its [`GradeBoundaries`] table:
//! it turns a set of module marks into an average and the average into a
//! letter grade.

pub mod boundary;
pub mod grade;
pub mod utility;

pub use boundary::{Boundary, GradeBoundaries};
pub use grade::{GradingPolicy, NOT_AVAILABLE, OVERSHOOT_GRADE};

/// Lowest mark a module can carry.
pub const MARK_MIN: f64 = 0.0;

/// Highest mark a module can carry.
pub const MARK_MAX: f64 = 100.0;
