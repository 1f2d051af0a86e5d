//! Background generation queue
//!
//! The queue-backed submission strategy: jobs go onto an in-process channel
//! and a fixed pool of workers drains it, running the full generation flow
//! for each job. Results and failures land in the trip store, observable by
//! status polling.

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::domain::TripRequest;
use crate::services::generator::ItineraryGenerator;

struct GenerationJob {
    trip_id: Uuid,
    request: TripRequest,
}

/// Handle for enqueueing generation jobs.
#[derive(Clone)]
pub struct GenerationQueue {
    tx: mpsc::UnboundedSender<GenerationJob>,
}

impl GenerationQueue {
    /// Spawn `workers` tasks draining a shared job channel.
    pub fn start(workers: usize, generator: Arc<ItineraryGenerator>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<GenerationJob>();
        let rx = Arc::new(Mutex::new(rx));

        for worker in 0..workers.max(1) {
            let rx = Arc::clone(&rx);
            let generator = Arc::clone(&generator);
            tokio::spawn(async move {
                loop {
                    let job = rx.lock().await.recv().await;
                    let Some(job) = job else {
                        debug!(worker, "Generation queue closed, worker exiting");
                        break;
                    };

                    debug!(worker, trip_id = %job.trip_id, "Worker picked up generation job");
                    match generator.run(job.trip_id, &job.request).await {
                        Ok(_) => {
                            info!(worker, trip_id = %job.trip_id, "Generation job completed");
                        }
                        Err(e) => {
                            error!(worker, trip_id = %job.trip_id, error = %e, "Generation job failed");
                        }
                    }
                }
            });
        }

        info!(workers = workers.max(1), "Generation queue started");
        Self { tx }
    }

    /// Enqueue a job. Fails only if every worker has exited.
    pub fn enqueue(&self, trip_id: Uuid, request: TripRequest) -> anyhow::Result<()> {
        self.tx
            .send(GenerationJob { trip_id, request })
            .map_err(|_| anyhow::anyhow!("generation queue is no longer accepting jobs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        BudgetRange, DateRange, Traveler, TravelStyle, TripDetails, TripPreferences, TripStatus,
    };
    use crate::error::GenerationError;
    use crate::services::llm::{GenerationClient, LlmClient};
    use crate::services::rate_limit::RateLimiter;
    use crate::services::store::{InMemoryTripStore, TripStore};
    use async_trait::async_trait;
    use std::time::Duration;

    struct FixedClient {
        response: String,
    }

    #[async_trait]
    impl LlmClient for FixedClient {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String, GenerationError> {
            Ok(self.response.clone())
        }

        fn model_name(&self) -> &str {
            "fixed"
        }

        fn provider_name(&self) -> &'static str {
            "fixed"
        }

        async fn health_check(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn request() -> TripRequest {
        TripRequest {
            user: Traveler {
                id: "u1".into(),
                travel_style: TravelStyle::Family,
                interests: vec!["parks".into()],
                num_people: 4,
                budget: BudgetRange {
                    currency: "USD".into(),
                    min: 800.0,
                    max: 2000.0,
                },
                dates: DateRange {
                    start: "2026-07-01".into(),
                    end: "2026-07-02".into(),
                },
            },
            trip: TripDetails {
                location: "San Diego, USA".into(),
                days: 1,
                preferences: TripPreferences::default(),
                constraints: None,
            },
            context: None,
        }
    }

    fn payload() -> String {
        serde_json::json!({
            "trip_id": "t",
            "summary": "A family day by the bay",
            "days": [{
                "day": 1,
                "date": "2026-07-01",
                "title": "Harbor day",
                "time_blocks": [{
                    "start": "09:00",
                    "end": "11:00",
                    "title": "Waterfront walk",
                    "type": "activity",
                    "location": "Embarcadero, San Diego"
                }]
            }],
            "estimated_cost": {"currency": "USD", "min": 100.0, "max": 300.0},
            "bookings": {"hotels": [], "activities": [], "flights": [], "transportation": []}
        })
        .to_string()
    }

    #[tokio::test]
    async fn queued_job_completes_and_is_observable_by_polling() {
        let store: Arc<InMemoryTripStore> = Arc::new(InMemoryTripStore::new());
        let generator = Arc::new(ItineraryGenerator::new(
            GenerationClient::new(
                Arc::new(FixedClient {
                    response: payload(),
                }),
                RateLimiter::new(60, Duration::from_secs(60)),
            ),
            store.clone(),
            3,
            Duration::from_millis(1),
        ));
        let queue = GenerationQueue::start(2, generator);

        let record = store.create(request());
        queue.enqueue(record.id, request()).unwrap();

        // Poll until the worker finishes.
        let mut status = TripStatus::Queued;
        for _ in 0..100 {
            tokio::time::sleep(Duration::from_millis(10)).await;
            status = store.get(record.id).unwrap().status;
            if status.is_terminal() {
                break;
            }
        }
        assert_eq!(status, TripStatus::Completed);
        assert!(store.get(record.id).unwrap().itinerary.is_some());
    }
}
