//! Trip request validation
//!
//! Pure structural checks over a deserialized [`TripRequest`]. Shape and
//! enum closure are enforced by serde at the boundary; this pass enforces
//! the cross-field invariants and collects every violation rather than
//! stopping at the first.

use crate::domain::TripRequest;
use crate::error::FieldError;

const MAX_TRIP_DAYS: u32 = 30;

/// Validate a trip request, returning every field-level violation.
pub fn validate_trip_request(request: &TripRequest) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if request.user.id.trim().is_empty() {
        errors.push(FieldError::new("user.id", "must not be empty"));
    }

    if request.user.interests.is_empty() {
        errors.push(FieldError::new(
            "user.interests",
            "at least one interest is required",
        ));
    } else if request.user.interests.iter().any(|i| i.trim().is_empty()) {
        errors.push(FieldError::new("user.interests", "interests must not be blank"));
    }

    if request.user.num_people == 0 {
        errors.push(FieldError::new("user.num_people", "must be a positive integer"));
    }

    let budget = &request.user.budget;
    if budget.currency.trim().is_empty() {
        errors.push(FieldError::new("user.budget.currency", "must not be empty"));
    }
    if budget.min <= 0.0 || !budget.min.is_finite() {
        errors.push(FieldError::new("user.budget.min", "must be a positive number"));
    }
    if budget.max <= 0.0 || !budget.max.is_finite() {
        errors.push(FieldError::new("user.budget.max", "must be a positive number"));
    }
    if budget.min.is_finite() && budget.max.is_finite() && budget.max < budget.min {
        errors.push(FieldError::new(
            "user.budget",
            "maximum budget must be greater than or equal to minimum",
        ));
    }

    let start = super::parse_iso_date(&request.user.dates.start);
    let end = super::parse_iso_date(&request.user.dates.end);
    if start.is_none() {
        errors.push(FieldError::new(
            "user.dates.start",
            "must be a valid YYYY-MM-DD date",
        ));
    }
    if end.is_none() {
        errors.push(FieldError::new(
            "user.dates.end",
            "must be a valid YYYY-MM-DD date",
        ));
    }
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            errors.push(FieldError::new(
                "user.dates",
                "end date must be after start date",
            ));
        }
    }

    if request.trip.location.trim().is_empty() {
        errors.push(FieldError::new("trip.location", "must not be empty"));
    }

    if request.trip.days == 0 || request.trip.days > MAX_TRIP_DAYS {
        errors.push(FieldError::new(
            "trip.days",
            format!("must be between 1 and {}", MAX_TRIP_DAYS),
        ));
    }

    if let Some(constraints) = &request.trip.constraints {
        if let Some(hours) = constraints.max_travel_hours_per_day {
            if hours <= 0.0 {
                errors.push(FieldError::new(
                    "trip.constraints.max_travel_hours_per_day",
                    "must be a positive number",
                ));
            }
        }
        if let Some(distance) = constraints.max_walking_distance {
            if distance <= 0.0 {
                errors.push(FieldError::new(
                    "trip.constraints.max_walking_distance",
                    "must be a positive number",
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BudgetRange, DateRange, Traveler, TravelStyle, TripDetails, TripPreferences, TripRequest,
    };

    fn valid_request() -> TripRequest {
        TripRequest {
            user: Traveler {
                id: "user-42".into(),
                travel_style: TravelStyle::Romantic,
                interests: vec!["food".into(), "art".into()],
                num_people: 2,
                budget: BudgetRange {
                    currency: "EUR".into(),
                    min: 500.0,
                    max: 1500.0,
                },
                dates: DateRange {
                    start: "2026-09-10".into(),
                    end: "2026-09-13".into(),
                },
            },
            trip: TripDetails {
                location: "Paris, France".into(),
                days: 3,
                preferences: TripPreferences::default(),
                constraints: None,
            },
            context: None,
        }
    }

    #[test]
    fn accepts_a_valid_request() {
        assert!(validate_trip_request(&valid_request()).is_ok());
    }

    #[test]
    fn rejects_inverted_budget() {
        let mut request = valid_request();
        request.user.budget.min = 2000.0;
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "user.budget"));
    }

    #[test]
    fn rejects_non_positive_budget_bounds() {
        let mut request = valid_request();
        request.user.budget.min = 0.0;
        request.user.budget.max = -10.0;
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "user.budget.min"));
        assert!(errors.iter().any(|e| e.field == "user.budget.max"));
    }

    #[test]
    fn rejects_malformed_and_inverted_dates() {
        let mut request = valid_request();
        request.user.dates.start = "10-09-2026".into();
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "user.dates.start"));

        let mut request = valid_request();
        request.user.dates.end = "2026-09-10".into();
        request.user.dates.start = "2026-09-13".into();
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "user.dates"));
    }

    #[test]
    fn rejects_empty_interests() {
        let mut request = valid_request();
        request.user.interests.clear();
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "user.interests"));
    }

    #[test]
    fn rejects_day_count_outside_range() {
        let mut request = valid_request();
        request.trip.days = 0;
        assert!(validate_trip_request(&request).is_err());

        request.trip.days = 31;
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "trip.days"));
    }

    #[test]
    fn collects_multiple_errors_at_once() {
        let mut request = valid_request();
        request.user.id = "".into();
        request.trip.location = "  ".into();
        request.trip.days = 0;
        let errors = validate_trip_request(&request).unwrap_err();
        assert!(errors.len() >= 3);
    }
}
