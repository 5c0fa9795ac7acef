//! Health check endpoint
//!
//! Liveness only: reports startup catalog state but never contacts the
//! database, so it answers 200 whenever the process is serving.

use hyper::{Response, StatusCode};
use serde::Serialize;

use super::{json_response, BoxBody};
use crate::server::AppState;

#[derive(Debug, Serialize)]
pub struct CatalogHealth {
    /// Load status of the items collection
    pub items: &'static str,
    /// Load status of the categories collection
    pub categories: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    /// Whether accounts can be created and logged into
    pub user_store: bool,
    pub catalog: CatalogHealth,
}

fn build_health_response(state: &AppState) -> HealthResponse {
    HealthResponse {
        success: true,
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().to_rfc3339(),
        user_store: state.auth.has_store(),
        catalog: CatalogHealth {
            items: state.catalog.items().status(),
            categories: state.catalog.categories().status(),
        },
    }
}

/// GET /api/health
pub fn health_check(state: &AppState) -> Response<BoxBody> {
    json_response(StatusCode::OK, &build_health_response(state))
}
