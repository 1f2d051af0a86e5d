//! Trip planning endpoints
//!
//! The HTTP surface over the generation core: submit a trip request, poll
//! its status, fetch the finished itinerary, list recent requests.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::{DataResponse, Paginated, PaginationParams};
use crate::app::AppState;
use crate::domain::{Itinerary, TripRecord, TripRequest, TripStatus};
use crate::error::{ApiError, ApiResult};
use crate::services::SubmissionOutcome;
use crate::validation::request::validate_trip_request;

#[derive(Serialize)]
pub struct CreateTripResponse {
    pub trip_request_id: Uuid,
    pub status: TripStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    pub message: String,
}

#[derive(Serialize)]
pub struct TripStatusResponse {
    pub trip_request_id: Uuid,
    pub status: TripStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TripSummary {
    pub trip_request_id: Uuid,
    pub status: TripStatus,
    pub location: String,
    pub days: u32,
    pub created_at: DateTime<Utc>,
}

impl From<TripRecord> for TripSummary {
    fn from(record: TripRecord) -> Self {
        Self {
            trip_request_id: record.id,
            status: record.status,
            location: record.request.trip.location,
            days: record.request.trip.days,
            created_at: record.created_at,
        }
    }
}

/// Submit a new trip request.
///
/// POST /trips
pub async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TripRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_trip_request(&request).map_err(ApiError::Validation)?;

    let record = state.store.create(request);
    tracing::info!(
        trip_id = %record.id,
        location = %record.request.trip.location,
        days = record.request.trip.days,
        "Trip request accepted"
    );

    let response = match state.submitter.submit(record.id, &record.request).await? {
        SubmissionOutcome::Completed(itinerary) => CreateTripResponse {
            trip_request_id: record.id,
            status: TripStatus::Completed,
            itinerary: Some(itinerary),
            message: "Trip generated successfully".to_string(),
        },
        SubmissionOutcome::Queued => CreateTripResponse {
            trip_request_id: record.id,
            status: TripStatus::Queued,
            itinerary: None,
            message: "Trip generation started. Check the status endpoint for updates.".to_string(),
        },
    };

    Ok(Json(DataResponse::new(response)))
}

/// Poll generation status for a trip request.
///
/// GET /trips/:trip_id/status
pub async fn get_trip_status(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .store
        .get(trip_id)
        .ok_or_else(|| ApiError::NotFound("Trip request not found".to_string()))?;

    Ok(Json(DataResponse::new(TripStatusResponse {
        trip_request_id: record.id,
        status: record.status,
        error_message: record.error_message,
        created_at: record.created_at,
    })))
}

/// Fetch the finished itinerary.
///
/// GET /trips/:trip_id
pub async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(trip_id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let record = state
        .store
        .get(trip_id)
        .ok_or_else(|| ApiError::NotFound("Trip request not found".to_string()))?;

    let itinerary = record
        .itinerary
        .ok_or_else(|| ApiError::NotFound("Itinerary not available yet".to_string()))?;

    Ok(Json(DataResponse::new(itinerary)))
}

/// List recent trip requests, newest first.
///
/// GET /trips
pub async fn list_trips(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<PaginationParams>,
) -> ApiResult<impl IntoResponse> {
    let (records, total) = state
        .store
        .list(pagination.offset(), pagination.limit());

    let summaries: Vec<TripSummary> = records.into_iter().map(TripSummary::from).collect();

    Ok(Paginated::new(summaries, &pagination, total as u64))
}
