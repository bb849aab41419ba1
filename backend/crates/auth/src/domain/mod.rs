//! Domain Layer
//!
//! Contains entities, value objects, and the ports the store depends on.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    AuthUser, AuthenticatedSession, PersistedAuth, ProfilePatch, Session, UserProfile,
};
pub use repository::{AuthBackend, LocalAuthBackend, SessionStorage};
pub use value_object::UserRole;
