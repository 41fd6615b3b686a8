//! Generated tests: creation, submission, history, and review drills.

pub mod client;
pub mod types;
