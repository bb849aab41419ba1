//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entities;
pub mod repository;

// Re-exports
pub use entities::{
    ALL_CATEGORY_ID, Airdrop, AirdropStatus, Category, Difficulty, NewAirdrop, NewCategory,
    NewTask, NewUserProfile, Task,
};
pub use repository::{
    AirdropRepository, CategoryRepository, HealthProbe, LocalAirdropRepository,
    LocalCategoryRepository, LocalHealthProbe, LocalUserRepository, UserRepository,
};
