//! Session Entities
//!
//! Credential bundle issued by the auth service and the record persisted
//! by the client store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{profile::UserProfile, user::AuthUser};

/// Opaque credential bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Expiry as a unix timestamp (seconds)
    #[serde(default)]
    pub expires_at: Option<i64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// A session without a known expiry is treated as live; the backend
    /// rejects it if it is not.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now.timestamp())
    }
}

/// A session the backend has confirmed, with its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedSession {
    pub user: AuthUser,
    pub session: Session,
}

/// The durable subset of the client store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    #[serde(default)]
    pub user: Option<AuthUser>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub session: Option<Session>,
}

impl PersistedAuth {
    pub fn is_empty(&self) -> bool {
        self.user.is_none() && self.profile.is_none() && self.session.is_none()
    }
}
