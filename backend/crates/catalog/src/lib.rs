//! Catalog (Data Access) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Airdrop, task and category entities, repository traits
//! - `application/` - Services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Contract
//! - `get_by_id` yields exactly one record or `CatalogError::NotFound`
//! - `get_all` yields the complete listing or an error, never a partial one
//! - `create` returns the stored row with server-assigned fields
//! - Public category listings start with a synthetic "All" entry

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::repository::HealthProbe;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
