//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! `get_by_id` returns the single matching record: zero or several matches
//! are a [`CatalogError::NotFound`](crate::error::CatalogError::NotFound).
//! `get_all` returns everything or fails; there are no partial results.

use auth::models::UserProfile;

use crate::domain::entities::{Airdrop, Category, NewAirdrop, NewCategory, NewUserProfile};
use crate::error::CatalogResult;

/// Airdrop repository trait
#[trait_variant::make(AirdropRepository: Send)]
pub trait LocalAirdropRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Airdrop>;

    /// `active_only` keeps airdrops whose status is `active`
    async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Airdrop>>;

    /// Insert the airdrop and its tasks atomically
    async fn create(&self, input: NewAirdrop) -> CatalogResult<Airdrop>;
}

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<Category>;

    async fn get_all(&self, active_only: bool) -> CatalogResult<Vec<Category>>;

    async fn create(&self, input: NewCategory) -> CatalogResult<Category>;
}

/// User profile repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn get_by_id(&self, id: &str) -> CatalogResult<UserProfile>;

    /// Leaderboard order, highest points first
    async fn get_all(&self) -> CatalogResult<Vec<UserProfile>>;

    async fn create(&self, input: NewUserProfile) -> CatalogResult<UserProfile>;
}

/// Backend reachability check
#[trait_variant::make(HealthProbe: Send)]
pub trait LocalHealthProbe {
    /// Minimal read against the backend
    async fn ping(&self) -> CatalogResult<()>;
}
