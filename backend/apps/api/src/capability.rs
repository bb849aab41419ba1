//! Ad capability endpoint

use axum::Json;
use axum::http::HeaderMap;
use platform::{AdCapability, client::RequestHostProbe};

/// GET /api/platform
///
/// Resolves the calling client's platform and ad provider from its request
/// headers. Never fails; detection problems fall back to the web provider.
pub async fn capability(headers: HeaderMap) -> Json<AdCapability> {
    Json(AdCapability::detect(&RequestHostProbe::new(&headers)))
}
