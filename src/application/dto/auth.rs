use chrono::{DateTime, Utc};
use std::fmt;

/// VO used when the caller does not name one (single-VO deployments).
pub const DEFAULT_VO: &str = "def";

/// Where the browser goes after a successful login when no safe target was given.
pub const DEFAULT_REDIRECT: &str = "/dashboard";

#[derive(Debug, Clone, Default)]
pub struct UserPassLoginRequest {
    pub username: String,
    pub password: String,
    pub account: String,
    pub vo: Option<String>,
    pub redirect_to: Option<String>,
}

/// Credentials forwarded to the auth server.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassCredentials {
    pub username: String,
    pub password: String,
    pub account: String,
    pub vo: String,
}

impl fmt::Debug for UserPassCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("account", &self.account)
            .field("vo", &self.vo)
            .finish()
    }
}

/// Token issued by the auth server.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassLoginResponse {
    pub identity: String,
    pub account: String,
    pub vo: String,
    pub token: AuthToken,
    pub redirect_to: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPassLoginErrorKind {
    InvalidRequest,
    InvalidCredentials,
    AuthServerError,
    Misconfigured,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassLoginError {
    pub kind: UserPassLoginErrorKind,
    pub message: String,
}

impl UserPassLoginError {
    pub fn new(kind: UserPassLoginErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
