//! Airdrops API server
//!
//! Startup failures are `anyhow` errors; request-time failures render
//! through `kernel::error::app_error::AppError`.

mod app;
mod capability;
mod config;
mod health;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use catalog::PgCatalogRepository;
use platform::client::NATIVE_PLATFORM_HEADER;
use platform::env::{ProcessEnv, REQUIRED_ENV, validate_required};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

const DEFAULT_FILTER: &str = "airdrops_api=info,catalog=info,auth=info,platform=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env(&ProcessEnv)?;

    // Missing keys only surface through /api/health
    let report = validate_required(&ProcessEnv, REQUIRED_ENV)?;
    if !report.is_valid() {
        tracing::warn!(missing = ?report.missing, "Required environment incomplete");
    }

    let pool = connect(&config.database_url).await?;

    let api = app::api_router(
        PgCatalogRepository::new(pool),
        Arc::new(ProcessEnv),
        config.app_env.clone(),
    );
    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins));

    tracing::info!(env = %config.app_env, addr = %config.bind_addr, "Airdrops API listening");
    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the pool and bring the schema up to date.
async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Database ready");
    Ok(pool)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(NATIVE_PLATFORM_HEADER),
        ]))
        .allow_credentials(true)
}
