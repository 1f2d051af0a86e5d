//! Trip submission façade
//!
//! The single entry point the request handlers call. One interface, two
//! strategies selected at startup: run generation inline and return the
//! itinerary, or enqueue a background job and return immediately. Callers
//! must not assume either behavior — they poll status or accept an inline
//! result.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Itinerary, TripRequest};
use crate::error::ApiResult;
use crate::services::generator::ItineraryGenerator;
use crate::services::queue::GenerationQueue;

/// What a submission produced.
pub enum SubmissionOutcome {
    /// Generation ran inline and finished.
    Completed(Itinerary),
    /// The job was handed to the background workers.
    Queued,
}

enum Strategy {
    Inline,
    Queued(GenerationQueue),
}

pub struct TripSubmitter {
    generator: Arc<ItineraryGenerator>,
    strategy: Strategy,
}

impl TripSubmitter {
    /// Synchronous-inline strategy.
    pub fn inline(generator: Arc<ItineraryGenerator>) -> Self {
        Self {
            generator,
            strategy: Strategy::Inline,
        }
    }

    /// Enqueue-and-poll strategy backed by a worker pool.
    pub fn queued(generator: Arc<ItineraryGenerator>, workers: usize) -> Self {
        let queue = GenerationQueue::start(workers, Arc::clone(&generator));
        Self {
            generator,
            strategy: Strategy::Queued(queue),
        }
    }

    pub async fn submit(
        &self,
        trip_id: Uuid,
        request: &TripRequest,
    ) -> ApiResult<SubmissionOutcome> {
        match &self.strategy {
            Strategy::Inline => {
                let itinerary = self.generator.run(trip_id, request).await?;
                Ok(SubmissionOutcome::Completed(itinerary))
            }
            Strategy::Queued(queue) => {
                queue.enqueue(trip_id, request.clone())?;
                Ok(SubmissionOutcome::Queued)
            }
        }
    }
}
