//! Application Configuration
//!
//! Configuration for the client auth store.

/// Auth store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Name of the persisted record holding `{user, profile, session}`
    pub storage_key: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            storage_key: "auth-storage".to_string(),
        }
    }
}

impl AuthConfig {
    pub fn with_storage_key(key: impl Into<String>) -> Self {
        Self {
            storage_key: key.into(),
        }
    }
}
