//! Application Layer
//!
//! The client auth store and its configuration.

pub mod config;
pub mod store;

// Re-exports
pub use config::AuthConfig;
pub use store::{AuthState, AuthStore};
