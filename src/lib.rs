//! # elearn (English learning platform client)
//!
//! `elearn` talks to the English learning platform's HTTP API: account login and
//! registration, textbook upload and parsing, knowledge-point chat, and test
//! generation and submission.
//!
//! ## Session & Route Guarding
//!
//! The [`features::auth::session::Session`] is the single source of truth for
//! who is signed in. It owns the bearer token (persisted through
//! [`features::auth::token::TokenStore`]) and the current user profile, and
//! publishes every change through a `watch` channel.
//!
//! - **Logged in** means both a token and a user profile are present. A token
//!   restored from disk only counts once the profile has been fetched.
//! - **Startup:** the entry point calls `Session::initialize` exactly once to
//!   hydrate the profile for a persisted token.
//! - **Navigation:** [`routes::Router`] runs [`features::auth::guards::AuthGuard`]
//!   before every navigation, including history moves. Protected pages
//!   redirect to `Login` with the intended path in `redirect`; guest-only pages
//!   redirect signed-in users to `Dashboard`.
//!
//! Tokens are held as `SecretString` and must never be logged.

pub mod cli;
pub mod client;
pub mod features;
pub mod routes;
pub mod storage;
pub mod util;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
