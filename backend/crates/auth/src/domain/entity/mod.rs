//! Entity Module

pub mod profile;
pub mod session;
pub mod user;

pub use profile::{ProfilePatch, UserProfile};
pub use session::{AuthenticatedSession, PersistedAuth, Session};
pub use user::AuthUser;
