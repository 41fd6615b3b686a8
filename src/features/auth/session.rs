//! Process-wide authentication state.
//!
//! [`Session`] owns the current token, user profile, and loading flag and is
//! the only thing allowed to change them. Every change is published through a
//! `watch` channel: guards and presenters hold a [`watch::Receiver`] and read
//! the latest [`SessionState`] without being able to mutate it. Each action
//! applies its whole transition in a single `send_modify`, so observers never
//! see a token without its user (the only exception is a token restored from
//! storage before `initialize` has fetched the profile).
//!
//! `loading` stays true while any action is in flight. A refresh only applies
//! its profile if the token it was issued for is still current.

use crate::{
    client::AppError,
    features::auth::{
        client::AuthApi,
        token::TokenStore,
        types::{AuthResponse, RegisterRequest, User, UserType},
    },
    storage::StorageError,
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Snapshot of the authentication state.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    pub token: Option<SecretString>,
    pub user: Option<User>,
    pub loading: bool,
}

/// Coarse lifecycle phase derived from a [`SessionState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticating,
    StaleToken,
    Authenticated,
}

impl SessionPhase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SessionPhase::Anonymous => "anonymous",
            SessionPhase::Authenticating => "authenticating",
            SessionPhase::StaleToken => "stale_token",
            SessionPhase::Authenticated => "authenticated",
        }
    }
}

impl SessionState {
    /// Both a token and a profile are present; a token alone does not count.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.user_type() == Some(UserType::Parent)
    }

    #[must_use]
    pub fn is_student(&self) -> bool {
        self.user_type() == Some(UserType::Student)
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Authenticating
        } else if self.is_logged_in() {
            SessionPhase::Authenticated
        } else if self.token.is_some() {
            SessionPhase::StaleToken
        } else {
            SessionPhase::Anonymous
        }
    }

    fn user_type(&self) -> Option<UserType> {
        self.user.as_ref().map(|user| user.user_type)
    }

    fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Result of `login` and `register`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure { message } => Some(message),
        }
    }
}

/// Result of `refresh`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No token, nothing to refresh.
    Skipped,
    /// Profile loaded; the session is authenticated.
    Refreshed,
    /// The server rejected the token; the session was logged out.
    Expired,
    /// The server could not be reached. The token is kept for a later
    /// attempt, but the session stays logged out until a profile loads.
    Unavailable { message: String },
}

/// Authentication state machine over an [`AuthApi`] and a [`TokenStore`].
pub struct Session<A> {
    api: A,
    tokens: TokenStore,
    state: watch::Sender<SessionState>,
    in_flight: AtomicUsize,
}

impl<A: AuthApi> Session<A> {
    /// Creates the session, restoring a persisted token if one exists. No
    /// request is made here; call [`Session::initialize`] to load the profile.
    ///
    /// # Errors
    /// Returns `StorageError` if the persisted token cannot be read.
    pub fn new(api: A, tokens: TokenStore) -> Result<Self, StorageError> {
        let token = tokens.get()?;
        if token.is_some() {
            debug!("restored persisted session token");
        }

        let (state, _) = watch::channel(SessionState {
            token,
            user: None,
            loading: false,
        });

        Ok(Self {
            api,
            tokens,
            state,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Startup hydration: refreshes once when a token is present but no
    /// profile has been loaded yet.
    ///
    /// # Errors
    /// Returns `StorageError` if an invalid token cannot be removed from storage.
    pub async fn initialize(&self) -> Result<RefreshOutcome, StorageError> {
        let needs_profile = {
            let state = self.state.borrow();
            state.token.is_some() && state.user.is_none()
        };

        if needs_profile {
            self.refresh().await
        } else {
            Ok(RefreshOutcome::Skipped)
        }
    }

    /// Read-only subscription to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in()
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        self.state.borrow().is_parent()
    }

    #[must_use]
    pub fn is_student(&self) -> bool {
        self.state.borrow().is_student()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Logs in. Request failures become `AuthOutcome::Failure` carrying the
    /// transport's message and leave the session untouched.
    ///
    /// # Errors
    /// Returns `StorageError` if the new token cannot be persisted.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthOutcome, StorageError> {
        let _loading = self.begin_loading();
        let result = self.api.login(email, password).await;
        self.complete_auth("login", result)
    }

    /// Registers a new account and signs in with it.
    ///
    /// # Errors
    /// Returns `StorageError` if the new token cannot be persisted.
    pub async fn register(
        &self,
        request: &RegisterRequest,
    ) -> Result<AuthOutcome, StorageError> {
        let _loading = self.begin_loading();
        let result = self.api.register(request).await;
        self.complete_auth("register", result)
    }

    /// Reloads the profile for the current token.
    ///
    /// # Errors
    /// Returns `StorageError` if an invalid token cannot be removed from storage.
    pub async fn refresh(&self) -> Result<RefreshOutcome, StorageError> {
        let Some(issued_for) = self.state.borrow().token.clone() else {
            return Ok(RefreshOutcome::Skipped);
        };

        let _loading = self.begin_loading();
        let result = self.api.current_user().await;
        if !self.holds_token(&issued_for) {
            // A logout or a new login raced this request and wins.
            debug!("session token changed while refreshing; result discarded");
            return Ok(RefreshOutcome::Skipped);
        }

        match result {
            Ok(user) => {
                let applied = self.state.send_if_modified(|state| {
                    if !same_token(state.token.as_ref(), &issued_for) {
                        return false;
                    }
                    state.user = Some(user);
                    true
                });

                if applied {
                    info!("session profile refreshed");
                    Ok(RefreshOutcome::Refreshed)
                } else {
                    debug!("session token changed while refreshing; profile discarded");
                    Ok(RefreshOutcome::Skipped)
                }
            }
            Err(err) if err.invalidates_session() => {
                warn!(error = %err, "session token rejected; logging out");
                self.logout()?;
                Ok(RefreshOutcome::Expired)
            }
            Err(err) => {
                warn!(error = %err, "profile refresh unavailable; keeping token");
                Ok(RefreshOutcome::Unavailable {
                    message: err.message().to_string(),
                })
            }
        }
    }

    /// Clears the token and profile in memory and in storage. Idempotent.
    ///
    /// # Errors
    /// Returns `StorageError` if the persisted token cannot be removed; the
    /// in-memory session is cleared regardless.
    pub fn logout(&self) -> Result<(), StorageError> {
        self.state.send_if_modified(|state| {
            let had_session = state.token.is_some() || state.user.is_some();
            state.clear();
            had_session
        });
        debug!("session cleared");
        self.tokens.clear()
    }

    fn complete_auth(
        &self,
        action: &'static str,
        result: Result<AuthResponse, AppError>,
    ) -> Result<AuthOutcome, StorageError> {
        match result {
            Ok(response) => {
                let token = SecretString::from(response.access_token);
                self.tokens.set(&token)?;
                self.state.send_modify(|state| {
                    state.token = Some(token);
                    state.user = Some(response.user);
                });
                info!(action, "session established");
                Ok(AuthOutcome::Success)
            }
            Err(err) => {
                debug!(action, error = %err, "authentication failed");
                Ok(AuthOutcome::Failure {
                    message: err.message().to_string(),
                })
            }
        }
    }

    fn holds_token(&self, token: &SecretString) -> bool {
        same_token(self.state.borrow().token.as_ref(), token)
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        // The counter only changes under the channel's write lock.
        self.state.send_modify(|state| {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            state.loading = true;
        });
        LoadingGuard {
            state: &self.state,
            in_flight: &self.in_flight,
        }
    }
}

fn same_token(current: Option<&SecretString>, expected: &SecretString) -> bool {
    current.is_some_and(|token| token.expose_secret() == expected.expose_secret())
}

/// Releases one in-flight action when dropped, including when the action's
/// future is dropped mid-request. `loading` clears with the last one.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<SessionState>,
    in_flight: &'a AtomicUsize,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| {
            let previous = self.in_flight.fetch_sub(1, Ordering::SeqCst);
            state.loading = previous > 1;
        });
    }
}
