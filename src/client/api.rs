//! HTTP transport for the platform's JSON API. Every request goes through
//! [`ApiClient`], which applies the configured timeout and user agent, attaches
//! the persisted bearer token when one exists, and turns non-success responses
//! into [`AppError::Http`] with the server's `detail` message. The token is read
//! from the [`TokenStore`] per request and is never logged.

use super::{config::ClientConfig, errors::AppError};
use crate::features::auth::token::TokenStore;
use reqwest::{Client, Method, RequestBuilder, Response, multipart::Form};
use secrecy::ExposeSecret;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{Instrument, debug, info_span};

/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: TokenStore,
}

impl ApiClient {
    /// Builds a client for the configured API base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig, tokens: TokenStore) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            tokens,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches JSON from `path`.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let builder = self.request(Method::GET, path)?;
        self.send(Method::GET, path, builder).await
    }

    /// Fetches JSON from `path` with URL query parameters.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn get_with_query<Q: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, AppError> {
        let builder = self.request(Method::GET, path)?.query(query);
        self.send(Method::GET, path, builder).await
    }

    /// Posts a JSON body and parses the JSON response.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let builder = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, path, builder).await
    }

    /// Posts without a body.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let builder = self.request(Method::POST, path)?;
        self.send(Method::POST, path, builder).await
    }

    /// Posts a multipart form, used for file uploads.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, AppError> {
        let builder = self.request(Method::POST, path)?.multipart(form);
        self.send(Method::POST, path, builder).await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    /// Returns `AppError` on transport failure, non-success status, or undecodable body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let builder = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, path, builder).await
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AppError> {
        let url = build_url_with_base(&self.base_url, path);
        let builder = self.http.request(method, url);

        let token = self
            .tokens
            .get()
            .map_err(|err| AppError::Storage(err.to_string()))?;

        Ok(match token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, AppError> {
        let span = info_span!("api.request", http.method = %method, path = %path);

        async move {
            let response = builder.send().await.map_err(map_request_error)?;
            debug!(status = response.status().as_u16(), "response received");
            handle_json_response(response).await
        }
        .instrument(span)
        .await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps reqwest failures into `AppError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
/// An empty success body decodes as JSON `null`.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|err| AppError::Network(format!("Failed to read response: {err}")))?;

    if status.is_success() {
        let body = if body.trim().is_empty() { "null" } else { &body };
        serde_json::from_str(body)
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(AppError::Http {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Extracts the server's error message: `detail` (string or validation list),
/// then `message`, then the raw body.
fn error_message(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let detail = match json.get("detail") {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                (!messages.is_empty()).then(|| messages.join("; "))
            }
            _ => None,
        };

        if let Some(message) = detail.or_else(|| {
            json.get("message")
                .and_then(Value::as_str)
                .map(ToString::to_string)
        }) {
            return sanitize_body(&message);
        }
    }

    sanitize_body(body)
}

/// Sanitizes error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
