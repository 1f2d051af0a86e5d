//! Generated itinerary domain types
//!
//! The JSON shape the generative model is asked to produce. Field names
//! match the wire format exactly; enums are closed so an out-of-vocabulary
//! value fails deserialization rather than flowing downstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Schema version stamped into generated itineraries
pub const SCHEMA_VERSION: &str = "1.0";

/// A currency-qualified budget window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRange {
    pub currency: String,
    pub min: f64,
    pub max: f64,
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Kind of time block within a day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Activity,
    Logistics,
    Meal,
    Transport,
    FreeTime,
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BlockType::Activity => write!(f, "activity"),
            BlockType::Logistics => write!(f, "logistics"),
            BlockType::Meal => write!(f, "meal"),
            BlockType::Transport => write!(f, "transport"),
            BlockType::FreeTime => write!(f, "free-time"),
        }
    }
}

/// Alternative suggestion for a time block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockAlternative {
    pub title: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

/// One scheduled slot within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeBlock {
    /// `HH:MM`, 24-hour
    pub start: String,
    /// `HH:MM`, 24-hour
    pub end: String,
    pub title: String,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<BlockAlternative>>,
}

/// Weather snapshot attached to a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub temperature: f64,
    pub condition: String,
    pub precipitation_chance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
}

/// One day of the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    /// 1-based index matching the day's position
    pub day: u32,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    pub title: String,
    pub time_blocks: Vec<TimeBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_forecast: Option<WeatherForecast>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A bookable item surfaced with the itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub provider: String,
    pub title: String,
    pub cost: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_code: Option<String>,
    pub status: BookingStatus,
}

/// Booking bundle grouped by category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bookings {
    #[serde(default)]
    pub hotels: Vec<BookingItem>,
    #[serde(default)]
    pub activities: Vec<BookingItem>,
    #[serde(default)]
    pub flights: Vec<BookingItem>,
    #[serde(default)]
    pub transportation: Vec<BookingItem>,
}

/// Generation provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<u8>,
}

/// A complete generated itinerary. Immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub trip_id: String,
    pub summary: String,
    pub days: Vec<DayPlan>,
    pub estimated_cost: BudgetRange,
    #[serde(default)]
    pub bookings: Bookings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerationMetadata>,
}
