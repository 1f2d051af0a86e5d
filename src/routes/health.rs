use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::services::LlmClient;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub provider: ProviderHealth,
}

#[derive(Serialize)]
pub struct ProviderHealth {
    pub name: String,
    pub model: String,
    pub status: String,
}

/// Health check endpoint - public
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let provider = state.generation_client.provider();
    let provider_result = provider.health_check().await;

    let provider_status = if provider_result.is_ok() { "ok" } else { "error" };

    // The provider is the only external dependency; a dead provider is
    // degraded, not down - queued submissions still accept and retry.
    let status = if provider_result.is_ok() {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider: ProviderHealth {
                name: provider.provider_name().to_string(),
                model: provider.model_name().to_string(),
                status: provider_status.to_string(),
            },
        }),
    )
}
