//! Knowledge-point chat and lookup.

pub mod client;
pub mod types;
