//! Router assembly
//!
//! Everything mounted under `/api`, generic over the repository so the
//! full surface can be exercised without a database.

use axum::{Router, routing::get};
use catalog::HealthProbe;
use catalog::domain::repository::{AirdropRepository, CategoryRepository, UserRepository};
use platform::env::EnvSource;
use std::sync::Arc;

use crate::capability;
use crate::health::{self, HealthState};

pub fn api_router<R>(repo: R, env: Arc<dyn EnvSource + Send + Sync>, app_env: String) -> Router
where
    R: AirdropRepository
        + CategoryRepository
        + UserRepository
        + HealthProbe
        + Clone
        + Send
        + Sync
        + 'static,
{
    let health_state = HealthState {
        probe: Arc::new(repo.clone()),
        env,
        app_env,
    };

    let system = Router::new()
        .route("/health", get(health::health::<R>))
        .with_state(health_state)
        .route("/platform", get(capability::capability));

    catalog::catalog_router_generic(repo).merge(system)
}
