//! Health endpoint
//!
//! `GET /api/health` aggregates the required-configuration check and a
//! backend reachability probe. It performs no writes.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use catalog::HealthProbe;
use chrono::{DateTime, Utc};
use kernel::error::app_error::AppError;
use platform::env::{EnvSource, REQUIRED_ENV, validate_required};
use serde::Serialize;
use std::sync::Arc;

const CACHE_CONTROL: HeaderValue = HeaderValue::from_static("no-store, max-age=0");

pub struct HealthState<P> {
    pub probe: Arc<P>,
    pub env: Arc<dyn EnvSource + Send + Sync>,
    pub app_env: String,
}

impl<P> Clone for HealthState<P> {
    fn clone(&self) -> Self {
        Self {
            probe: self.probe.clone(),
            env: self.env.clone(),
            app_env: self.app_env.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: &'static str,
    pub database: &'static str,
    pub api: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub node_env: String,
}

impl HealthResponse {
    #[inline]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// GET /api/health
pub async fn health<P>(State(state): State<HealthState<P>>) -> Response
where
    P: HealthProbe + Send + Sync + 'static,
{
    let report = match validate_required(state.env.as_ref(), REQUIRED_ENV) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            let err = AppError::internal("Health check failed").with_source(e);
            return ([(header::CACHE_CONTROL, CACHE_CONTROL)], err).into_response();
        }
    };

    let connected = match state.probe.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database probe failed");
            false
        }
    };

    let body = HealthResponse {
        status: if report.is_valid() && connected {
            "healthy"
        } else {
            "unhealthy"
        },
        environment: if report.is_valid() { "valid" } else { "invalid" },
        database: if connected { "connected" } else { "disconnected" },
        api: "ok",
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION"),
        node_env: state.app_env.clone(),
    };

    let status = if body.is_healthy() {
        StatusCode::OK
    } else {
        tracing::warn!(
            environment = body.environment,
            database = body.database,
            "Service unhealthy"
        );
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, [(header::CACHE_CONTROL, CACHE_CONTROL)], Json(body)).into_response()
}
