//! Platform features and their API clients. Auth owns the session and the
//! navigation guard; the remaining modules are thin typed wrappers over the
//! shared [`crate::client::ApiClient`].

pub mod assessments;
pub mod auth;
pub mod chat;
pub mod textbooks;
