//! Ports
//!
//! Interfaces to the auth service and to durable client storage.
//! Implementations are in the infrastructure layer.

use std::sync::Arc;

use crate::domain::entity::{
    profile::UserProfile,
    session::{AuthenticatedSession, PersistedAuth, Session},
};
use crate::error::AuthResult;

/// Remote auth service.
#[trait_variant::make(AuthBackend: Send)]
pub trait LocalAuthBackend {
    /// Confirm (or refresh) a stored session.
    ///
    /// `Ok(None)` means there is no usable session; that is not an error.
    async fn restore_session(
        &self,
        stored: Option<&Session>,
    ) -> AuthResult<Option<AuthenticatedSession>>;

    /// Load the application profile for an authenticated user.
    async fn fetch_profile(&self, user_id: &str) -> AuthResult<Option<UserProfile>>;

    /// Revoke the session on the server.
    async fn sign_out(&self, session: &Session) -> AuthResult<()>;
}

/// Durable key/value storage for the persisted client record.
///
/// Calls are synchronous: the store writes inside its atomic update so the
/// stored record always follows mutation order.
pub trait SessionStorage: Send + Sync {
    fn load(&self, key: &str) -> AuthResult<Option<PersistedAuth>>;

    fn save(&self, key: &str, record: &PersistedAuth) -> AuthResult<()>;

    fn remove(&self, key: &str) -> AuthResult<()>;
}

impl<T: SessionStorage + ?Sized> SessionStorage for Arc<T> {
    fn load(&self, key: &str) -> AuthResult<Option<PersistedAuth>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, record: &PersistedAuth) -> AuthResult<()> {
        (**self).save(key, record)
    }

    fn remove(&self, key: &str) -> AuthResult<()> {
        (**self).remove(key)
    }
}
