//! Connection settings for the platform API. Values come from CLI flags or
//! `ELEARN_*` environment variables; nothing here is secret.

use super::errors::AppError;
use std::time::Duration;
use url::Url;

/// Default API root, matching the platform backend's `/api` prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
/// Default request timeout (seconds) applied to every API call.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Client configuration shared by the transport and feature clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a config for `api_base_url`, keeping defaults for everything else.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the URL is empty, unparsable, or not http(s).
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        let api_base_url = normalize_base_url(api_base_url)?;
        Ok(Self {
            api_base_url,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        if let Some(value) = normalize_value(user_agent) {
            self.user_agent = value;
        }
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let value = normalize_value(raw)
        .ok_or_else(|| AppError::Config("API base URL is not configured.".to_string()))?;

    let url = Url::parse(&value)
        .map_err(|err| AppError::Config(format!("Invalid API base URL {value}: {err}")))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {scheme}"
            )));
        }
    }

    Ok(value.trim_end_matches('/').to_string())
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
