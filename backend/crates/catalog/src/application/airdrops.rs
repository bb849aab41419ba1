//! Airdrop Service

use std::sync::Arc;

use crate::domain::entities::{Airdrop, NewAirdrop};
use crate::domain::repository::AirdropRepository;
use crate::error::CatalogResult;

pub struct AirdropService<R>
where
    R: AirdropRepository,
{
    repo: Arc<R>,
}

impl<R> AirdropService<R>
where
    R: AirdropRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, active_only: bool) -> CatalogResult<Vec<Airdrop>> {
        let airdrops = self.repo.get_all(active_only).await?;
        tracing::debug!(count = airdrops.len(), active_only, "Listed airdrops");
        Ok(airdrops)
    }

    pub async fn get(&self, id: &str) -> CatalogResult<Airdrop> {
        self.repo.get_by_id(id).await
    }

    pub async fn create(&self, input: NewAirdrop) -> CatalogResult<Airdrop> {
        input.validate()?;
        let airdrop = self.repo.create(input).await?;
        tracing::info!(
            airdrop_id = %airdrop.id,
            status = %airdrop.status,
            tasks = airdrop.tasks.len(),
            "Airdrop created"
        );
        Ok(airdrop)
    }
}
