//! Student session lifecycle and the roster of finalized records.
//!
//! [`SessionStore`] is the only mutator. It validates raw input strings,
//! keeps the single unsaved [`ActiveSession`], and on finalize copies the
//! session's [`ModuleMarks`] into a [`StudentRecord`] held by the [`Roster`].

mod marks;
mod roster;
mod store;
mod types;

pub use marks::ModuleMarks;
pub use roster::Roster;
pub use store::SessionStore;
pub use types::{
    ActiveSession, DiscardedSession, LiveReport, MarkAddedInfo, SessionStatus, StudentRecord,
};
