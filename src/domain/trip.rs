//! Trip request domain types
//!
//! The user-submitted planning request and the record that tracks its
//! lifecycle through generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::itinerary::{BudgetRange, Itinerary};

/// Travel style selected by the requester
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TravelStyle {
    Adventure,
    Relaxed,
    Family,
    Romantic,
    Cultural,
    Luxury,
}

impl std::fmt::Display for TravelStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TravelStyle::Adventure => write!(f, "adventure"),
            TravelStyle::Relaxed => write!(f, "relaxed"),
            TravelStyle::Family => write!(f, "family"),
            TravelStyle::Romantic => write!(f, "romantic"),
            TravelStyle::Cultural => write!(f, "cultural"),
            TravelStyle::Luxury => write!(f, "luxury"),
        }
    }
}

/// Desired daily pacing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Pacing {
    Relaxed,
    Moderate,
    Intense,
}

/// Preferred mode of getting around
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    Public,
    PrivateCar,
    Walking,
    Mixed,
}

/// Lodging tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AccommodationType {
    Budget,
    MidRange,
    Luxury,
    Boutique,
}

/// Soft preferences attached to a trip request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pacing: Option<Pacing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport: Option<TransportMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_type: Option<AccommodationType>,
}

/// Hard constraints the itinerary must respect
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripConstraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_travel_hours_per_day: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_walking_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_restrictions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accommodation_requirements: Option<Vec<String>>,
}

/// Travel window as ISO `YYYY-MM-DD` strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Who is travelling and with what means
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Traveler {
    pub id: String,
    pub travel_style: TravelStyle,
    pub interests: Vec<String>,
    pub num_people: u32,
    pub budget: BudgetRange,
    pub dates: DateRange,
}

/// Where to and for how long
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDetails {
    pub location: String,
    pub days: u32,
    #[serde(default)]
    pub preferences: TripPreferences,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<TripConstraints>,
}

/// Optional generation context hints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TripContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_api: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_events_api: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

/// A complete trip planning request. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRequest {
    pub user: Traveler,
    pub trip: TripDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<TripContext>,
}

/// Lifecycle status of a trip request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Queued,
    Processing,
    Retrying,
    Completed,
    Failed,
}

impl TripStatus {
    /// Terminal states are sticky: a record never leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Failed)
    }
}

impl std::fmt::Display for TripStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripStatus::Queued => write!(f, "queued"),
            TripStatus::Processing => write!(f, "processing"),
            TripStatus::Retrying => write!(f, "retrying"),
            TripStatus::Completed => write!(f, "completed"),
            TripStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Stored record for one trip request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecord {
    pub id: Uuid,
    pub request: TripRequest,
    pub status: TripStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_style_serializes_lowercase() {
        let json = serde_json::to_string(&TravelStyle::Romantic).unwrap();
        assert_eq!(json, "\"romantic\"");
    }

    #[test]
    fn transport_mode_uses_kebab_case() {
        let mode: TransportMode = serde_json::from_str("\"private-car\"").unwrap();
        assert_eq!(mode, TransportMode::PrivateCar);
    }

    #[test]
    fn terminal_statuses() {
        assert!(TripStatus::Completed.is_terminal());
        assert!(TripStatus::Failed.is_terminal());
        assert!(!TripStatus::Retrying.is_terminal());
        assert!(!TripStatus::Queued.is_terminal());
    }
}
