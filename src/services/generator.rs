//! Itinerary generation controller
//!
//! Drives the retry/fallback state machine: up to `max_retries` primary
//! attempts with exponential backoff (longer base for network conditions),
//! switching to the retry-with-errors prompt once an invalid output exists,
//! then one degraded fallback attempt before surfacing a terminal error.
//! Transient failures never leave this module.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::domain::{GenerationMetadata, Itinerary, TripRequest, TripStatus, SCHEMA_VERSION};
use crate::error::GenerationError;
use crate::prompts::{self, Prompt};
use crate::services::llm::GenerationClient;
use crate::services::store::TripStore;
use crate::validation::response::{correct_locations, parse_itinerary, validate_itinerary};

/// Confidence attached to an itinerary from the primary prompt path.
const PRIMARY_CONFIDENCE: u8 = 95;
/// Lower confidence for the degraded fallback path.
const FALLBACK_CONFIDENCE: u8 = 70;

pub struct ItineraryGenerator {
    client: GenerationClient,
    store: Arc<dyn TripStore>,
    max_retries: u32,
    base_delay: Duration,
}

impl ItineraryGenerator {
    pub fn new(
        client: GenerationClient,
        store: Arc<dyn TripStore>,
        max_retries: u32,
        base_delay: Duration,
    ) -> Self {
        Self {
            client,
            store,
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Run the full generation flow for a stored record: mark it
    /// processing, generate, persist the itinerary or the terminal failure.
    pub async fn run(&self, trip_id: Uuid, request: &TripRequest) -> Result<Itinerary, GenerationError> {
        self.store
            .update_status(trip_id, TripStatus::Processing, None);

        match self.generate(trip_id, request).await {
            Ok(itinerary) => {
                self.store.put_itinerary(trip_id, itinerary.clone());
                info!(trip_id = %trip_id, "Trip generation completed");
                Ok(itinerary)
            }
            Err(e) => {
                self.store
                    .update_status(trip_id, TripStatus::Failed, Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Generate an itinerary for the request, retrying and degrading per
    /// the controller state machine.
    #[instrument(skip(self, request), fields(trip_id = %trip_id))]
    pub async fn generate(
        &self,
        trip_id: Uuid,
        request: &TripRequest,
    ) -> Result<Itinerary, GenerationError> {
        let mut last_error: Option<GenerationError> = None;
        // Raw output + error summary from the latest parse/validation
        // failure, feeding the retry-with-errors prompt.
        let mut last_invalid: Option<(String, String)> = None;

        for attempt in 1..=self.max_retries {
            let prompt = match &last_invalid {
                Some((previous, errors)) if attempt > 1 => {
                    prompts::build_retry(request, previous, errors)
                }
                _ => prompts::build_primary(request),
            };

            match self.attempt(&prompt, request).await {
                Ok(itinerary) => {
                    info!(attempt, "Itinerary generated");
                    return Ok(finalize(itinerary, trip_id, PRIMARY_CONFIDENCE));
                }
                Err((error, raw)) => {
                    warn!(attempt, error = %error, "Generation attempt failed");
                    if let Some(raw) = raw {
                        last_invalid = Some((raw, error.to_string()));
                    }
                    let network = error.is_network();
                    let message = error.to_string();
                    last_error = Some(error);

                    if attempt < self.max_retries {
                        self.store
                            .update_status(trip_id, TripStatus::Retrying, Some(message));
                        let delay = self.backoff_delay(attempt, network);
                        debug!(delay_ms = delay.as_millis() as u64, "Backing off before retry");
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        info!("Primary attempts exhausted, trying fallback prompt");
        let fallback = prompts::build_fallback(request);
        match self.attempt(&fallback, request).await {
            Ok(itinerary) => {
                info!("Fallback generation succeeded");
                Ok(finalize(itinerary, trip_id, FALLBACK_CONFIDENCE))
            }
            Err((fallback_error, _)) => {
                warn!(error = %fallback_error, "Fallback generation failed");
                let message = last_error.unwrap_or(fallback_error).to_string();
                Err(GenerationError::Exhausted {
                    attempts: self.max_retries,
                    message,
                })
            }
        }
    }

    /// One full attempt: client call, parse, validate, correct. On parse or
    /// validation failure the raw output is returned alongside the error so
    /// the next attempt can ask the model to fix it.
    async fn attempt(
        &self,
        prompt: &Prompt,
        request: &TripRequest,
    ) -> Result<Itinerary, (GenerationError, Option<String>)> {
        let raw = self.client.generate(prompt).await.map_err(|e| (e, None))?;

        let itinerary = match parse_itinerary(&raw) {
            Ok(itinerary) => itinerary,
            Err(e) => return Err((e, Some(raw))),
        };

        if let Err(errors) = validate_itinerary(&itinerary, request) {
            return Err((GenerationError::InvalidItinerary(errors), Some(raw)));
        }

        Ok(correct_locations(itinerary, &request.trip.location))
    }

    fn backoff_delay(&self, attempt: u32, network: bool) -> Duration {
        // Network conditions back off from a doubled base.
        let base = if network {
            self.base_delay * 2
        } else {
            self.base_delay
        };
        base * 2u32.saturating_pow(attempt.saturating_sub(1).min(16))
    }
}

fn finalize(mut itinerary: Itinerary, trip_id: Uuid, confidence: u8) -> Itinerary {
    // The stored itinerary is keyed by our record id, not whatever id the
    // model invented.
    itinerary.trip_id = trip_id.to_string();
    itinerary.metadata = Some(GenerationMetadata {
        generated_at: Utc::now(),
        version: SCHEMA_VERSION.to_string(),
        confidence_score: Some(confidence),
    });
    itinerary
}
