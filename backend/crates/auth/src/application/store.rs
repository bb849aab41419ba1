//! Persisted Client Store
//!
//! Single source of truth for the current user's identity, profile and
//! session. The state sits in a `watch` channel: every mutation is one
//! atomic replacement, and observers subscribe to receive whole snapshots.
//!
//! `user`, `profile` and `session` are persisted on every change, from inside
//! the same update, so the stored record follows mutation order. Loading
//! and error flags are transient and `is_admin` is derived, so none of them
//! are ever read back from storage.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    profile::{ProfilePatch, UserProfile},
    session::{AuthenticatedSession, PersistedAuth, Session},
    user::AuthUser,
};
use crate::domain::repository::{AuthBackend, SessionStorage};
use crate::error::AuthResult;

/// Snapshot of the session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub profile: Option<UserProfile>,
    pub session: Option<Session>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            profile: None,
            session: None,
            is_loading: true,
            error: None,
        }
    }
}

impl AuthState {
    /// State after sign-out.
    pub fn cleared() -> Self {
        Self {
            is_loading: false,
            ..Self::default()
        }
    }

    /// Derived from `profile.role`; there is no stored flag to drift.
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.profile.as_ref().is_some_and(UserProfile::is_admin)
    }

    pub fn persisted(&self) -> PersistedAuth {
        PersistedAuth {
            user: self.user.clone(),
            profile: self.profile.clone(),
            session: self.session.clone(),
        }
    }

    fn restore(&mut self, record: PersistedAuth) {
        self.user = record.user;
        self.profile = record.profile;
        self.session = record.session;
    }
}

type Restored = Option<(AuthenticatedSession, Option<UserProfile>)>;

/// Client auth store.
///
/// Constructed explicitly with [`AuthStore::open`] and shared by reference
/// (typically `Arc<AuthStore<..>>`).
pub struct AuthStore<B, S>
where
    B: AuthBackend,
    S: SessionStorage,
{
    backend: B,
    storage: S,
    config: AuthConfig,
    state: watch::Sender<AuthState>,
    initialize_started: AtomicBool,
    /// Bumped by every manual write to `user`, `profile` or `session`.
    auth_epoch: AtomicU64,
}

impl<B, S> AuthStore<B, S>
where
    B: AuthBackend,
    S: SessionStorage,
{
    /// Create the store and rehydrate the persisted record, if any.
    pub fn open(backend: B, storage: S, config: AuthConfig) -> Self {
        let mut state = AuthState::default();

        match storage.load(&config.storage_key) {
            Ok(Some(record)) => {
                tracing::debug!(
                    key = %config.storage_key,
                    has_session = record.session.is_some(),
                    "Rehydrated auth state"
                );
                state.restore(record);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    key = %config.storage_key,
                    error = %e,
                    "Ignoring unreadable persisted auth state"
                );
            }
        }

        let (state, _) = watch::channel(state);

        Self {
            backend,
            storage,
            config,
            state,
            initialize_started: AtomicBool::new(false),
            auth_epoch: AtomicU64::new(0),
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Receive every future snapshot.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin()
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Fetch the current session and profile from the backend.
    ///
    /// Runs at most once per store; later or concurrent calls return at
    /// once. If a manual setter wrote auth state while the fetch was in
    /// flight, the fetched values are discarded.
    pub async fn initialize(&self) {
        if self.initialize_started.swap(true, Ordering::AcqRel) {
            tracing::debug!("Auth store already initialized, skipping");
            return;
        }

        // Setters bump the epoch under the write lock, so reading both under
        // the read lock pairs the epoch with the session it describes.
        let (epoch, stored) = {
            let state = self.state.borrow();
            (self.auth_epoch.load(Ordering::Acquire), state.session.clone())
        };
        let outcome = self.fetch_current(stored.as_ref()).await;

        self.state.send_modify(|state| {
            let superseded = self.auth_epoch.load(Ordering::Acquire) != epoch;

            match outcome {
                Ok(_) if superseded => {
                    tracing::debug!("Auth state changed during initialization, dropping fetch result");
                }
                Ok(Some((authenticated, profile))) => {
                    tracing::info!(user_id = %authenticated.user.id, "Session restored");
                    state.user = Some(authenticated.user);
                    state.session = Some(authenticated.session);
                    state.profile = profile;
                    state.error = None;
                    self.persist(state);
                }
                Ok(None) => {
                    if state.session.is_some() {
                        tracing::info!("Stored session is no longer valid");
                    }
                    state.user = None;
                    state.session = None;
                    state.profile = None;
                    state.error = None;
                    self.persist(state);
                }
                Err(e) => {
                    e.log();
                    state.error = Some(e.to_string());
                }
            }

            state.is_loading = false;
        });
    }

    /// Flush the persisted record and release the store.
    pub fn dispose(self) {
        let state = self.snapshot();
        self.persist(&state);
        tracing::debug!(key = %self.config.storage_key, "Auth store disposed");
    }

    // ========================================================================
    // Setters
    // ========================================================================

    pub fn set_user(&self, user: Option<AuthUser>) {
        self.mutate_auth(|state| state.user = user);
    }

    pub fn set_profile(&self, profile: Option<UserProfile>) {
        self.mutate_auth(|state| state.profile = profile);
    }

    pub fn set_session(&self, session: Option<Session>) {
        self.mutate_auth(|state| state.session = session);
    }

    pub fn set_loading(&self, is_loading: bool) {
        self.state.send_modify(|state| state.is_loading = is_loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|state| state.error = error);
    }

    /// Merge `patch` into the loaded profile. No-op without a profile.
    pub fn update_profile(&self, patch: ProfilePatch) {
        self.state.send_if_modified(|state| {
            let Some(profile) = state.profile.as_mut() else {
                tracing::debug!("update_profile called without a loaded profile");
                return false;
            };

            self.auth_epoch.fetch_add(1, Ordering::AcqRel);
            patch.apply(profile);
            self.persist(state);
            true
        });
    }

    pub fn clear_auth(&self) {
        self.mutate_auth(|state| *state = AuthState::cleared());
    }

    /// Revoke the session remotely (best effort), then clear local state.
    pub async fn sign_out(&self) {
        let session = self.state.borrow().session.clone();

        if let Some(session) = session {
            if let Err(e) = self.backend.sign_out(&session).await {
                tracing::warn!(error = %e, "Backend sign-out failed, clearing local state anyway");
            }
        }

        self.clear_auth();
        tracing::info!("Signed out");
    }

    // ========================================================================
    // Internals
    // ========================================================================

    async fn fetch_current(&self, stored: Option<&Session>) -> AuthResult<Restored> {
        let Some(authenticated) = self.backend.restore_session(stored).await? else {
            return Ok(None);
        };

        let profile = self.backend.fetch_profile(&authenticated.user.id).await?;
        Ok(Some((authenticated, profile)))
    }

    fn mutate_auth(&self, f: impl FnOnce(&mut AuthState)) {
        self.state.send_modify(|state| {
            self.auth_epoch.fetch_add(1, Ordering::AcqRel);
            f(state);
            self.persist(state);
        });
    }

    fn persist(&self, state: &AuthState) {
        let record = state.persisted();
        let key = &self.config.storage_key;

        let result = if record.is_empty() {
            self.storage.remove(key)
        } else {
            self.storage.save(key, &record)
        };

        if let Err(e) = result {
            tracing::warn!(key = %key, error = %e, "Failed to persist auth state");
        }
    }
}
