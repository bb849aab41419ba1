//! Catalog Error Types
//!
//! Data-access failures, integrated with the unified
//! `kernel::error::AppError` system. Every variant displays the backend
//! message verbatim.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Lookup matched zero or several rows, or could not be answered
    #[error("{0}")]
    NotFound(String),

    /// Input rejected, either before the write or by a constraint
    #[error("{0}")]
    Validation(String),

    /// The backend answered with an error
    #[error("{0}")]
    Backend(String),

    /// The backend could not be reached
    #[error("{0}")]
    Unavailable(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CatalogError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::Backend(_) => ErrorKind::InternalServerError,
            CatalogError::Unavailable(_) => ErrorKind::ServiceUnavailable,
        }
    }

    /// Single-record lookups report every failure as not-found, keeping the
    /// original message.
    pub fn into_lookup(self) -> Self {
        match self {
            CatalogError::NotFound(msg)
            | CatalogError::Validation(msg)
            | CatalogError::Backend(msg)
            | CatalogError::Unavailable(msg) => CatalogError::NotFound(msg),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            CatalogError::Backend(msg) => {
                tracing::error!(message = %msg, "Catalog backend error");
            }
            CatalogError::Unavailable(msg) => {
                tracing::error!(message = %msg, "Catalog backend unreachable");
            }
            CatalogError::Validation(msg) => {
                tracing::warn!(message = %msg, "Catalog write rejected");
            }
            CatalogError::NotFound(msg) => {
                tracing::debug!(message = %msg, "Catalog record not found");
            }
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => CatalogError::NotFound("No rows returned".to_string()),
            sqlx::Error::Database(db) => {
                let message = db.message().to_string();
                // SQLSTATE class 23: integrity constraint violation
                if db.code().is_some_and(|code| code.starts_with("23")) {
                    CatalogError::Validation(message)
                } else {
                    CatalogError::Backend(message)
                }
            }
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => CatalogError::Unavailable(err.to_string()),
            other => CatalogError::Backend(other.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
