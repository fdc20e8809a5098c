pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod grading;
pub mod output;
pub mod render;
pub mod report;
pub mod session;

pub use error::{BoundaryError, ValidationError};
pub use grading::{GradeBoundaries, GradingPolicy};
pub use session::{ModuleMarks, SessionStore, StudentRecord};
