//! Request and response types for the auth endpoints. Requests carry
//! passwords, so their `Debug` output is redacted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User identifier as returned by the backend (numeric or string).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(formatter, "{id}"),
            UserId::Text(id) => formatter.write_str(id),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Parent,
    Student,
    #[serde(other)]
    Other,
}

/// Account types that can be registered. Profiles may carry other types
/// (see [`UserType::Other`]); registration only offers these two.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Parent,
    Student,
}

impl From<AccountType> for UserType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Parent => UserType::Parent,
            AccountType::Student => UserType::Student,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub email: String,
    pub user_type: UserType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration payload. The server owns validation of every field.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub user_type: AccountType,
    pub name: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("user_type", &self.user_type)
            .field("name", &self.name)
            .finish()
    }
}

/// Login and registration response.
#[derive(Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("AuthResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("user", &self.user)
            .finish()
    }
}
