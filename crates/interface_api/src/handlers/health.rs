//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::error::ApiError;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: None,
    })
}

/// Readiness check against the ledger store
///
/// Answers 503 with an error body when the store is unreachable.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    let store = state.service.store();
    store.health_check().await.map_err(|e| {
        warn!(backend = store.backend_name(), error = %e, "Readiness check failed");
        ApiError::Unavailable(format!("{} store is not ready: {}", store.backend_name(), e))
    })?;

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: Some(store.backend_name().to_string()),
    }))
}
