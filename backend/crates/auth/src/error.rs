//! Auth Error Types
//!
//! Failures of the auth backend and of session storage. None of these ever
//! escape the client store as a panic: the store records them in its
//! `error` field or logs them.

use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth service answered with an error; message passed through verbatim
    #[error("{0}")]
    Backend(String),

    /// The auth service could not be reached
    #[error("Auth service unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the persisted record failed
    #[error("Session storage error: {0}")]
    Storage(String),

    /// Persisted or received JSON did not match the expected shape
    #[error("Invalid auth payload: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown user role: {0}")]
    UnknownRole(String),
}

impl AuthError {
    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Unavailable(msg) => {
                tracing::error!(message = %msg, "Auth service unreachable");
            }
            AuthError::Storage(msg) => {
                tracing::error!(message = %msg, "Session storage failure");
            }
            AuthError::Serialization(e) => {
                tracing::warn!(error = %e, "Auth payload rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AuthError::Backend(format!("Unexpected auth response: {err}"))
        } else {
            AuthError::Unavailable(err.to_string())
        }
    }
}

impl From<std::io::Error> for AuthError {
    fn from(err: std::io::Error) -> Self {
        AuthError::Storage(err.to_string())
    }
}
