pub mod health;
pub mod trips;

use axum::{routing::get, routing::post, Router};
use std::sync::Arc;

use crate::app::AppState;

/// Build the API router with all routes
pub fn api_router() -> Router<Arc<AppState>> {
    Router::new()
        // Public routes
        .route("/health", get(health::health_check))
        // Trips
        .route("/trips", post(trips::create_trip))
        .route("/trips", get(trips::list_trips))
        .route("/trips/:trip_id", get(trips::get_trip))
        .route("/trips/:trip_id/status", get(trips::get_trip_status))
}
