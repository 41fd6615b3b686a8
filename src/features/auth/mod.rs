//! Auth feature module: token persistence, the session state machine, and the
//! navigation guard built on it. Everything here touches credentials and must
//! never log passwords or token material.
//!
//! Flow overview: startup restores the token and calls `Session::initialize`,
//! which fetches the profile once. Login and register store the returned token
//! before publishing the new state. A profile fetch that the server rejects
//! logs the user out; one that never reached the server keeps the token for a
//! later retry.

pub mod client;
pub mod guards;
pub mod session;
pub mod token;
pub mod types;

pub use client::{AuthApi, AuthClient};
pub use guards::{AuthGuard, post_login_destination};
pub use session::{AuthOutcome, RefreshOutcome, Session, SessionPhase, SessionState};
pub use token::TokenStore;
