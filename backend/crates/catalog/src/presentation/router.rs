//! Catalog Router

use crate::domain::repository::{AirdropRepository, CategoryRepository, UserRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository) -> Router {
    catalog_router_generic(repo)
}

/// Create a generic catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R) -> Router
where
    R: AirdropRepository + CategoryRepository + UserRepository + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/categories",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .route("/categories/{id}", get(handlers::get_category::<R>))
        .route(
            "/airdrops",
            get(handlers::list_airdrops::<R>).post(handlers::create_airdrop::<R>),
        )
        .route("/airdrops/{id}", get(handlers::get_airdrop::<R>))
        .route(
            "/users",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route("/users/{id}", get(handlers::get_user::<R>))
        .with_state(state)
}
