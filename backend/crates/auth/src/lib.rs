//! Auth (Client Session) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Identity, profile and session entities, backend/storage ports
//! - `application/` - The persisted client store
//! - `infra/` - Supabase client and storage adapters
//!
//! ## Features
//! - Explicitly constructed store, rehydrated from durable storage on open
//! - One-shot session restore (validate or refresh) plus profile fetch
//! - `is_admin` derived from the profile role
//! - Best-effort remote sign-out that always clears local state

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::{AuthConfig, AuthState, AuthStore};
pub use error::{AuthError, AuthResult};
pub use infra::{FileSessionStorage, MemorySessionStorage, SupabaseAuthBackend, SupabaseConfig};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}
