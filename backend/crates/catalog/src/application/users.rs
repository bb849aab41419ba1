//! User Profile Service

use auth::models::UserProfile;
use std::sync::Arc;

use crate::domain::entities::NewUserProfile;
use crate::domain::repository::UserRepository;
use crate::error::CatalogResult;

pub struct UserService<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self) -> CatalogResult<Vec<UserProfile>> {
        self.repo.get_all().await
    }

    pub async fn get(&self, id: &str) -> CatalogResult<UserProfile> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, input: NewUserProfile) -> CatalogResult<UserProfile> {
        input.validate()?;
        let profile = self.repo.create(input).await?;
        tracing::info!(user_id = %profile.id, role = %profile.role, "User profile created");
        Ok(profile)
    }
}
