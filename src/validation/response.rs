//! Itinerary response validation and location correction
//!
//! The model's output is parsed, checked against the itinerary schema, and
//! then run through a correction pass that qualifies every location with the
//! destination city so downstream geocoding resolves to the right place.

use serde_json::error::Category;

use crate::domain::{Itinerary, TripRequest};
use crate::error::GenerationError;

/// Parse raw model output into an [`Itinerary`].
///
/// Syntax failures (not JSON at all) and schema failures (JSON of the wrong
/// shape, out-of-vocabulary enum values) are distinct error kinds: the first
/// is a malformed payload, the second feeds the retry-with-errors prompt.
pub fn parse_itinerary(raw: &str) -> Result<Itinerary, GenerationError> {
    match serde_json::from_str::<Itinerary>(raw) {
        Ok(itinerary) => Ok(itinerary),
        Err(e) => match e.classify() {
            Category::Syntax | Category::Eof | Category::Io => {
                Err(GenerationError::MalformedResponse(e.to_string()))
            }
            Category::Data => Err(GenerationError::InvalidItinerary(vec![e.to_string()])),
        },
    }
}

/// Validate a parsed itinerary against the schema invariants.
///
/// Collects every violation so the retry prompt can list them all.
pub fn validate_itinerary(
    itinerary: &Itinerary,
    request: &TripRequest,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if itinerary.trip_id.trim().is_empty() {
        errors.push("trip_id: must not be empty".to_string());
    }

    if itinerary.summary.trim().len() < 10 {
        errors.push("summary: must be at least 10 characters".to_string());
    }

    if itinerary.days.is_empty() {
        errors.push("days: at least one day is required".to_string());
    } else if itinerary.days.len() != request.trip.days as usize {
        errors.push(format!(
            "days: expected {} days, got {}",
            request.trip.days,
            itinerary.days.len()
        ));
    }

    for (index, day) in itinerary.days.iter().enumerate() {
        let expected = index as u32 + 1;
        if day.day != expected {
            errors.push(format!(
                "days[{}].day: expected 1-based index {}, got {}",
                index, expected, day.day
            ));
        }
        if super::parse_iso_date(&day.date).is_none() {
            errors.push(format!(
                "days[{}].date: must be a valid YYYY-MM-DD date",
                index
            ));
        }
        if day.title.trim().is_empty() {
            errors.push(format!("days[{}].title: must not be empty", index));
        }
        if day.time_blocks.is_empty() {
            errors.push(format!(
                "days[{}].time_blocks: at least one block is required",
                index
            ));
        }
        for (block_index, block) in day.time_blocks.iter().enumerate() {
            let path = format!("days[{}].time_blocks[{}]", index, block_index);
            if !super::is_hhmm(&block.start) {
                errors.push(format!("{}.start: must be HH:MM", path));
            }
            if !super::is_hhmm(&block.end) {
                errors.push(format!("{}.end: must be HH:MM", path));
            }
            if block.title.trim().is_empty() {
                errors.push(format!("{}.title: must not be empty", path));
            }
            if block.location.trim().is_empty() {
                errors.push(format!("{}.location: must not be empty", path));
            }
        }
    }

    let cost = &itinerary.estimated_cost;
    if cost.currency.trim().is_empty() {
        errors.push("estimated_cost.currency: must not be empty".to_string());
    }
    if cost.max < cost.min {
        errors.push("estimated_cost: max must be greater than or equal to min".to_string());
    }

    if let Some(metadata) = &itinerary.metadata {
        if let Some(score) = metadata.confidence_score {
            if score > 100 {
                errors.push("metadata.confidence_score: must be between 0 and 100".to_string());
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Generic location names the model falls back to when it does not know a
/// real place. Each maps to a destination-qualified alternative.
fn replace_placeholder(location: &str, city: &str) -> Option<String> {
    match location {
        "Local Restaurant" | "Restaurant" => Some(format!("{} Specialty Restaurant", city)),
        "Local Cafe" | "Cafe" => Some(format!("{} Coffee House", city)),
        "Hotel Restaurant" => Some(format!("{} Hotel Dining", city)),
        "Popular Attraction" | "Attraction" => Some(format!("{} Main Landmark", city)),
        _ => None,
    }
}

/// Extract the city from a free-text destination, e.g.
/// "Manali, Himachal Pradesh" -> "Manali".
fn city_of(requested_location: &str) -> &str {
    requested_location
        .split(',')
        .next()
        .unwrap_or(requested_location)
        .trim()
}

/// Qualify every block location with the destination city.
///
/// Replaces known placeholder names, then appends ", {city}" to any location
/// that does not already mention the city. Idempotent: a second pass finds
/// every location already qualified and changes nothing.
pub fn correct_locations(mut itinerary: Itinerary, requested_location: &str) -> Itinerary {
    let city = city_of(requested_location);
    if city.is_empty() {
        return itinerary;
    }

    for day in &mut itinerary.days {
        for block in &mut day.time_blocks {
            let location = block.location.trim();
            if location.is_empty() {
                continue;
            }

            let mut corrected = replace_placeholder(location, city)
                .unwrap_or_else(|| location.to_string());

            if !corrected.contains(city) {
                tracing::debug!(
                    original = %block.location,
                    city = %city,
                    "Qualifying location with destination city"
                );
                corrected = format!("{}, {}", corrected, city);
            }

            block.location = corrected;
        }
    }

    itinerary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BlockType, Bookings, BudgetRange, DateRange, DayPlan, Itinerary, TimeBlock, Traveler,
        TravelStyle, TripDetails, TripPreferences, TripRequest,
    };

    fn block(location: &str) -> TimeBlock {
        TimeBlock {
            start: "10:00".into(),
            end: "12:00".into(),
            title: "Morning walk".into(),
            block_type: BlockType::Activity,
            location: location.into(),
            description: None,
            cost: None,
            currency: None,
            notes: None,
            coordinates: None,
            booking_required: None,
            alternatives: None,
        }
    }

    fn itinerary_with_locations(locations: &[&str]) -> Itinerary {
        Itinerary {
            trip_id: "trip-123".into(),
            summary: "Two relaxed days exploring the town on foot".into(),
            days: vec![DayPlan {
                day: 1,
                date: "2026-10-12".into(),
                title: "Arrival".into(),
                time_blocks: locations.iter().map(|l| block(l)).collect(),
                weather_forecast: None,
                notes: None,
            }],
            estimated_cost: BudgetRange {
                currency: "INR".into(),
                min: 10000.0,
                max: 42000.0,
            },
            bookings: Bookings::default(),
            metadata: None,
        }
    }

    fn request(days: u32, location: &str) -> TripRequest {
        TripRequest {
            user: Traveler {
                id: "u1".into(),
                travel_style: TravelStyle::Relaxed,
                interests: vec!["hiking".into()],
                num_people: 2,
                budget: BudgetRange {
                    currency: "INR".into(),
                    min: 10000.0,
                    max: 42000.0,
                },
                dates: DateRange {
                    start: "2026-10-12".into(),
                    end: "2026-10-14".into(),
                },
            },
            trip: TripDetails {
                location: location.into(),
                days,
                preferences: TripPreferences::default(),
                constraints: None,
            },
            context: None,
        }
    }

    #[test]
    fn non_json_payload_is_malformed() {
        let err = parse_itinerary("Sure! Here is your itinerary:").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
    }

    #[test]
    fn wrong_shape_is_schema_failure() {
        let err = parse_itinerary(r#"{"trip_id": 42}"#).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidItinerary(_)));
    }

    #[test]
    fn unknown_block_type_fails_parsing() {
        let raw = serde_json::json!({
            "trip_id": "t1",
            "summary": "A long enough summary here",
            "days": [{
                "day": 1,
                "date": "2026-10-12",
                "title": "Day one",
                "time_blocks": [{
                    "start": "10:00",
                    "end": "12:00",
                    "title": "Walk",
                    "type": "sightseeing",
                    "location": "Old Town"
                }]
            }],
            "estimated_cost": {"currency": "EUR", "min": 1.0, "max": 2.0},
            "bookings": {"hotels": [], "activities": [], "flights": [], "transportation": []}
        })
        .to_string();
        let err = parse_itinerary(&raw).unwrap_err();
        assert!(matches!(err, GenerationError::InvalidItinerary(_)));
    }

    #[test]
    fn day_count_must_match_request() {
        let itinerary = itinerary_with_locations(&["Mall Road, Manali"]);
        let errors = validate_itinerary(&itinerary, &request(3, "Manali, Himachal Pradesh"))
            .unwrap_err();
        assert!(errors.iter().any(|e| e.contains("expected 3 days")));
    }

    #[test]
    fn day_indices_must_be_positional() {
        let mut itinerary = itinerary_with_locations(&["Mall Road, Manali"]);
        itinerary.days[0].day = 2;
        let errors = validate_itinerary(&itinerary, &request(1, "Manali")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("1-based index 1")));
    }

    #[test]
    fn bad_block_times_are_reported() {
        let mut itinerary = itinerary_with_locations(&["Mall Road, Manali"]);
        itinerary.days[0].time_blocks[0].start = "9am".into();
        let errors = validate_itinerary(&itinerary, &request(1, "Manali")).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("must be HH:MM")));
    }

    #[test]
    fn placeholder_gets_destination_qualified() {
        let itinerary = itinerary_with_locations(&["Local Restaurant"]);
        let corrected = correct_locations(itinerary, "Manali, Himachal Pradesh");
        let location = &corrected.days[0].time_blocks[0].location;
        assert!(location.contains("Manali"), "got {:?}", location);
    }

    #[test]
    fn unqualified_location_gets_city_appended() {
        let itinerary = itinerary_with_locations(&["Mall Road"]);
        let corrected = correct_locations(itinerary, "Manali, Himachal Pradesh");
        assert_eq!(corrected.days[0].time_blocks[0].location, "Mall Road, Manali");
    }

    #[test]
    fn already_qualified_location_is_untouched() {
        let itinerary = itinerary_with_locations(&["Hadimba Temple, Manali"]);
        let corrected = correct_locations(itinerary, "Manali, Himachal Pradesh");
        assert_eq!(
            corrected.days[0].time_blocks[0].location,
            "Hadimba Temple, Manali"
        );
    }

    #[test]
    fn correction_is_idempotent() {
        let itinerary =
            itinerary_with_locations(&["Local Restaurant", "Mall Road", "Hadimba Temple, Manali"]);
        let once = correct_locations(itinerary, "Manali, Himachal Pradesh");
        let twice = correct_locations(once.clone(), "Manali, Himachal Pradesh");
        let locations_once: Vec<_> = once.days[0]
            .time_blocks
            .iter()
            .map(|b| b.location.clone())
            .collect();
        let locations_twice: Vec<_> = twice.days[0]
            .time_blocks
            .iter()
            .map(|b| b.location.clone())
            .collect();
        assert_eq!(locations_once, locations_twice);
    }
}
