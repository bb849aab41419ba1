//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use auth::models::UserProfile;

use crate::application::{AirdropService, CategoryService, UserService};
use crate::domain::entities::{Airdrop, Category};
use crate::domain::repository::{AirdropRepository, CategoryRepository, UserRepository};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    AirdropListQuery, CreateAirdropRequest, CreateCategoryRequest, CreateUserRequest, ErrorBody,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for CatalogAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

// ============================================================================
// Categories
// ============================================================================

/// GET /api/categories
///
/// Failures answer `{"error": message}` with 500 so listing pages can fall
/// back to the "All" entry alone.
pub async fn list_categories<R>(State(state): State<CatalogAppState<R>>) -> Response
where
    R: CategoryRepository + Send + Sync + 'static,
{
    match CategoryService::new(state.repo.clone()).list_public().await {
        Ok(categories) => Json(categories).into_response(),
        Err(e) => {
            e.log();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /api/categories/{id}
pub async fn get_category<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Category>>
where
    R: CategoryRepository + Send + Sync + 'static,
{
    let category = CategoryService::new(state.repo.clone()).get(&id).await?;
    Ok(Json(category))
}

/// POST /api/categories
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<CreateCategoryRequest>,
) -> CatalogResult<(StatusCode, Json<Category>)>
where
    R: CategoryRepository + Send + Sync + 'static,
{
    let category = CategoryService::new(state.repo.clone())
        .create(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(category)))
}

// ============================================================================
// Airdrops
// ============================================================================

/// GET /api/airdrops?active=bool
pub async fn list_airdrops<R>(
    State(state): State<CatalogAppState<R>>,
    Query(query): Query<AirdropListQuery>,
) -> CatalogResult<Json<Vec<Airdrop>>>
where
    R: AirdropRepository + Send + Sync + 'static,
{
    let airdrops = AirdropService::new(state.repo.clone())
        .list(query.active_only())
        .await?;
    Ok(Json(airdrops))
}

/// GET /api/airdrops/{id}
pub async fn get_airdrop<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<Airdrop>>
where
    R: AirdropRepository + Send + Sync + 'static,
{
    let airdrop = AirdropService::new(state.repo.clone()).get(&id).await?;
    Ok(Json(airdrop))
}

/// POST /api/airdrops
pub async fn create_airdrop<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<CreateAirdropRequest>,
) -> CatalogResult<(StatusCode, Json<Airdrop>)>
where
    R: AirdropRepository + Send + Sync + 'static,
{
    let airdrop = AirdropService::new(state.repo.clone())
        .create(req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(airdrop)))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<UserProfile>>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let users = UserService::new(state.repo.clone()).list().await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<UserProfile>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = UserService::new(state.repo.clone()).get(&id).await?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user<R>(
    State(state): State<CatalogAppState<R>>,
    Json(req): Json<CreateUserRequest>,
) -> CatalogResult<(StatusCode, Json<UserProfile>)>
where
    R: UserRepository + Send + Sync + 'static,
{
    let user = UserService::new(state.repo.clone()).create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
