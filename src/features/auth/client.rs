//! Client wrappers for the auth endpoints. The session depends on the
//! [`AuthApi`] trait rather than the HTTP client so it can run against
//! scripted responses; [`AuthClient`] is the production implementation.

use crate::{
    client::{ApiClient, AppError},
    features::auth::types::{AuthResponse, LoginRequest, RegisterRequest, User},
};
use std::future::Future;

/// Requests the session needs from the auth service.
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a token and profile.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse, AppError>> + Send;

    /// Creates an account and returns its token and profile.
    fn register(
        &self,
        request: &RegisterRequest,
    ) -> impl Future<Output = Result<AuthResponse, AppError>> + Send;

    /// Fetches the profile for the bearer token the transport attaches.
    fn current_user(&self) -> impl Future<Output = Result<User, AppError>> + Send;
}

/// Auth endpoints over the shared [`ApiClient`].
#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl AuthApi for AuthClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        login(&self.api, email, password).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
        register(&self.api, request).await
    }

    async fn current_user(&self) -> Result<User, AppError> {
        current_user(&self.api).await
    }
}

/// Logs in with email and password. Must never log the password.
///
/// # Errors
/// Returns `AppError` if the request fails or the credentials are rejected.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> Result<AuthResponse, AppError> {
    api.post_json("/auth/login", &LoginRequest { email, password })
        .await
}

/// Registers a new account.
///
/// # Errors
/// Returns `AppError` if the request fails or the server rejects the data.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<AuthResponse, AppError> {
    api.post_json("/auth/register", request).await
}

/// Fetches the current user for the persisted bearer token.
///
/// # Errors
/// Returns `AppError` if the request fails or the token is rejected.
pub async fn current_user(api: &ApiClient) -> Result<User, AppError> {
    api.get("/auth/me").await
}
