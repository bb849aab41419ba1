//! Value Object Module

pub mod user_role;

pub use user_role::UserRole;
