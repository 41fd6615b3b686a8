//! Shared HTTP plumbing for the platform API: transport, configuration, and
//! error classification.
//!
//! The backend mounts its routers under `/api`: `/auth`, `/textbooks`, `/chat`
//! and `/tests`. Authenticated endpoints expect `Authorization: Bearer <token>`
//! where the token came from login or registration. Failed requests carry a
//! FastAPI-style `{"detail": ...}` body whose text is surfaced to callers as-is.

pub mod api;
pub mod config;
pub mod errors;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use errors::AppError;
