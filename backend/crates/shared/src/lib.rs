//! Shared Kernel - Cross-crate error vocabulary
//!
//! Everything here has the same meaning in every crate of the workspace:
//! - [`error::app_error::AppError`], the error every route renders
//! - [`error::kind::ErrorKind`], the HTTP-facing classification
//! - RFC 7807 rendering for axum (feature `axum`)

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
