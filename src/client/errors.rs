use std::fmt;

/// Failure of a platform API call, classified so callers can tell a rejected
/// credential apart from a flaky network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
    Storage(String),
}

impl AppError {
    /// The bare user-facing message, without the category prefix used by `Display`.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            AppError::Config(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message)
            | AppError::Storage(message)
            | AppError::Http { message, .. } => message,
        }
    }

    /// HTTP status code when the server answered with a non-success response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure says nothing about the credential: the request
    /// never reached the server, timed out, or the server is having trouble.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            AppError::Network(_)
            | AppError::Timeout(_)
            | AppError::Config(_)
            | AppError::Serialization(_)
            | AppError::Storage(_) => true,
            AppError::Http { status, .. } => {
                *status >= 500 || *status == 408 || *status == 429
            }
            AppError::Parse(_) => false,
        }
    }

    /// True when the server answered and refused the current credential or
    /// returned something that cannot be a profile.
    #[must_use]
    pub const fn invalidates_session(&self) -> bool {
        !self.is_transient()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
            AppError::Storage(message) => write!(formatter, "Storage error: {message}"),
        }
    }
}

impl std::error::Error for AppError {}
