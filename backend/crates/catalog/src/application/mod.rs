//! Application Layer
//!
//! Services over the repositories.

pub mod airdrops;
pub mod categories;
pub mod users;

// Re-exports
pub use airdrops::AirdropService;
pub use categories::CategoryService;
pub use users::UserService;
