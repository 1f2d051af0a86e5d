//! Prompt templates for itinerary generation
//!
//! Pure string construction: given the same request, each builder returns
//! the same prompt. Three variants exist — the primary prompt, a degraded
//! fallback used once the primary path is exhausted, and a retry prompt that
//! re-embeds a previous invalid output together with its validation errors.

use serde::Serialize;
use serde_json::json;

use crate::domain::TripRequest;

/// A provider-agnostic prompt. Providers with a system role send both
/// parts separately; others concatenate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const PRIMARY_SYSTEM: &str = "You are an expert travel planner for Traverse, a premium travel \
planning platform. Always respond with valid JSON only. Be extremely precise with enum values - \
use exactly the values specified in the instructions. CRITICAL: ALL location names MUST be REAL, \
EXISTING places in the requested destination. NEVER use generic names like \"Local Restaurant\" \
or \"Popular Cafe\". Use ACTUAL business names and landmarks that exist in the specified \
location. NEVER suggest places from different countries/cities than requested. MOST IMPORTANT: \
EVERY location name MUST include the CITY NAME in format \"Place Name, City Name\" (e.g., \
\"The Corner House, Manali\" or \"India Gate, Delhi\") so each place geocodes in the correct city.";

const FALLBACK_SYSTEM: &str = "You are a backup travel planner. Always respond with valid JSON \
only. Be extremely precise with enum values - use exactly the values specified in the \
instructions.";

const GENERATION_RULES: &str = "You are an expert travel itinerary generator for Traverse. Your \
task is to create detailed, personalized travel itineraries based on user preferences.

CRITICAL REQUIREMENTS:
1. Always respond with VALID JSON only - no markdown, no explanations, no additional text
2. Follow the exact JSON schema provided
3. Create realistic, practical itineraries with accurate time blocks
4. Include specific locations, costs, and booking information where applicable
5. Consider weather, local events, and user constraints
6. Ensure time blocks don't overlap and allow buffer time between activities
7. Provide cost estimates in the user's currency
8. Include alternative options for key activities

OUTPUT FORMAT: JSON object with keys: trip_id, summary, days, estimated_cost, bookings
Each day must have: day, date, title, time_blocks array
Each time_block must have: start, end, title, type, location, cost (optional), notes (optional)
Allowed time_block type values: \"activity\", \"logistics\", \"meal\", \"transport\", \"free-time\"";

const FALLBACK_REQUEST: &str = "The previous generation failed. Please create a simpler \
itinerary with the same structure but fewer activities. Focus on essential logistics and 2-3 \
key activities per day. Respond with JSON only.";

fn pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

fn example_output() -> serde_json::Value {
    json!({
        "trip_id": "trip-9876",
        "summary": "4-day relaxed adventure in Manali focusing on hikes, local cuisine and photography",
        "days": [
            {
                "day": 1,
                "date": "2025-10-12",
                "title": "Arrival & Local Exploration",
                "time_blocks": [
                    {
                        "start": "14:00",
                        "end": "16:00",
                        "title": "Check-in at boutique hotel",
                        "type": "logistics",
                        "location": "The Mountain Hideout, Manali",
                        "cost": 0,
                        "notes": "Light lunch provided, mountain views available"
                    },
                    {
                        "start": "16:30",
                        "end": "19:00",
                        "title": "Mall Road photography walk",
                        "type": "activity",
                        "location": "Mall Road, Manali",
                        "cost": 0,
                        "notes": "Golden hour photography opportunity"
                    }
                ]
            }
        ],
        "estimated_cost": {
            "currency": "INR",
            "min": 30000,
            "max": 42000
        },
        "bookings": {
            "hotels": [],
            "activities": [],
            "flights": [],
            "transportation": []
        }
    })
}

/// Build the primary generation prompt.
pub fn build_primary(request: &TripRequest) -> Prompt {
    let user = &request.user;
    let trip = &request.trip;
    let time_zone = request
        .context
        .as_ref()
        .and_then(|c| c.time_zone.as_deref())
        .unwrap_or("local");

    let body = format!(
        "{rules}\n\n\
         USER REQUEST DETAILS:\n{request_json}\n\n\
         EXAMPLE OUTPUT FORMAT:\n{example}\n\n\
         Generate a comprehensive {days}-day itinerary for {people} people traveling to \
         {location} from {start} to {end}.\n\n\
         Requirements:\n\
         - Travel style: {style}\n\
         - Interests: {interests}\n\
         - Budget: {currency} {min} - {max}\n\
         - Preferences: {preferences}\n\
         - Consider {time_zone} timezone\n\
         - Include realistic costs and practical time blocks\n\
         - Add buffer time between activities\n\
         - Suggest booking-ready activities where applicable\n\n\
         Respond with JSON only.",
        rules = GENERATION_RULES,
        request_json = pretty_json(request),
        example = pretty_json(&example_output()),
        days = trip.days,
        people = user.num_people,
        location = trip.location,
        start = user.dates.start,
        end = user.dates.end,
        style = user.travel_style,
        interests = user.interests.join(", "),
        currency = user.budget.currency,
        min = user.budget.min,
        max = user.budget.max,
        preferences = serde_json::to_string(&trip.preferences).unwrap_or_else(|_| "{}".into()),
        time_zone = time_zone,
    );

    Prompt {
        system: PRIMARY_SYSTEM.to_string(),
        user: body,
    }
}

/// Build the degraded fallback prompt, used once the primary path is
/// exhausted.
pub fn build_fallback(request: &TripRequest) -> Prompt {
    Prompt {
        system: FALLBACK_SYSTEM.to_string(),
        user: format!(
            "{}\n\nOriginal request: {}",
            FALLBACK_REQUEST,
            pretty_json(request)
        ),
    }
}

/// Build the retry prompt that asks the model to correct its previous
/// invalid output.
pub fn build_retry(request: &TripRequest, previous_output: &str, errors: &str) -> Prompt {
    let body = format!(
        "{rules}\n\n\
         Original Request:\n{request_json}\n\n\
         Previous Output (which had errors):\n{previous}\n\n\
         Errors: {errors}\n\n\
         Please fix the JSON structure and provide a valid itinerary. Ensure all required \
         fields are present and properly formatted. Respond with JSON only.",
        rules = GENERATION_RULES,
        request_json = pretty_json(request),
        previous = previous_output,
        errors = errors,
    );

    Prompt {
        system: PRIMARY_SYSTEM.to_string(),
        user: body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BudgetRange, DateRange, Traveler, TravelStyle, TripDetails, TripPreferences, TripRequest,
    };

    fn request() -> TripRequest {
        TripRequest {
            user: Traveler {
                id: "u1".into(),
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
    fn primary_prompt_embeds_request_details() {
        let prompt = build_primary(&request());
        assert!(prompt.user.contains("Paris, France"));
        assert!(prompt.user.contains("romantic"));
        assert!(prompt.user.contains("food, art"));
        assert!(prompt.user.contains("3-day itinerary"));
        assert!(prompt.user.contains("EUR 500 - 1500"));
        assert!(prompt.user.ends_with("Respond with JSON only."));
    }

    #[test]
    fn primary_prompt_is_deterministic() {
        assert_eq!(build_primary(&request()), build_primary(&request()));
    }

    #[test]
    fn fallback_prompt_asks_for_a_simpler_itinerary() {
        let prompt = build_fallback(&request());
        assert!(prompt.user.contains("simpler"));
        assert!(prompt.user.contains("Original request:"));
        assert!(prompt.system.contains("backup travel planner"));
    }

    #[test]
    fn retry_prompt_embeds_previous_output_and_errors() {
        let prompt = build_retry(&request(), "{\"oops\": true}", "days: expected 3 days, got 1");
        assert!(prompt.user.contains("{\"oops\": true}"));
        assert!(prompt.user.contains("expected 3 days"));
        assert!(prompt.user.contains("Please fix the JSON structure"));
    }
}
