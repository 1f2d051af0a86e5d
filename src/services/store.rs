//! Trip store
//!
//! Single-key persistence for trip records. Each trip id is written by
//! exactly one generation flow, so last-write-wins per key is sufficient.
//! Terminal statuses are sticky: once a record is completed or failed, later
//! status writes are ignored.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{Itinerary, TripRecord, TripRequest, TripStatus};

/// Aggregate counters over stored records
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TripStats {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Key-value persistence for trip requests and their results.
pub trait TripStore: Send + Sync {
    /// Insert a fresh record for an accepted request, status `queued`.
    fn create(&self, request: TripRequest) -> TripRecord;

    fn get(&self, id: Uuid) -> Option<TripRecord>;

    /// Update lifecycle status. A no-op once the record is terminal.
    fn update_status(&self, id: Uuid, status: TripStatus, error_message: Option<String>);

    /// Attach the generated itinerary and mark the record completed.
    fn put_itinerary(&self, id: Uuid, itinerary: Itinerary);

    /// Newest-first page of records plus the total count.
    fn list(&self, offset: usize, limit: usize) -> (Vec<TripRecord>, usize);

    fn stats(&self) -> TripStats;

    /// Drop terminal records older than the given age. Returns how many
    /// were removed.
    fn purge_older_than(&self, age: Duration) -> usize;
}

/// In-memory trip store.
#[derive(Default)]
pub struct InMemoryTripStore {
    records: RwLock<HashMap<Uuid, TripRecord>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripStore for InMemoryTripStore {
    fn create(&self, request: TripRequest) -> TripRecord {
        let now = Utc::now();
        let record = TripRecord {
            id: Uuid::new_v4(),
            request,
            status: TripStatus::Queued,
            error_message: None,
            itinerary: None,
            created_at: now,
            updated_at: now,
        };
        self.records.write().insert(record.id, record.clone());
        record
    }

    fn get(&self, id: Uuid) -> Option<TripRecord> {
        self.records.read().get(&id).cloned()
    }

    fn update_status(&self, id: Uuid, status: TripStatus, error_message: Option<String>) {
        let mut records = self.records.write();
        let Some(record) = records.get_mut(&id) else {
            warn!(trip_id = %id, "Status update for unknown trip");
            return;
        };
        if record.status.is_terminal() {
            warn!(
                trip_id = %id,
                current = %record.status,
                requested = %status,
                "Ignoring status update on terminal record"
            );
            return;
        }
        record.status = status;
        record.error_message = error_message;
        record.updated_at = Utc::now();
    }

    fn put_itinerary(&self, id: Uuid, itinerary: Itinerary) {
        let mut records = self.records.write();
        let Some(record) = records.get_mut(&id) else {
            warn!(trip_id = %id, "Itinerary for unknown trip");
            return;
        };
        if record.status.is_terminal() {
            warn!(trip_id = %id, "Ignoring itinerary for terminal record");
            return;
        }
        record.itinerary = Some(itinerary);
        record.status = TripStatus::Completed;
        record.error_message = None;
        record.updated_at = Utc::now();
    }

    fn list(&self, offset: usize, limit: usize) -> (Vec<TripRecord>, usize) {
        let records = self.records.read();
        let total = records.len();
        let mut all: Vec<TripRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        (all.into_iter().skip(offset).take(limit).collect(), total)
    }

    fn stats(&self) -> TripStats {
        let records = self.records.read();
        TripStats {
            total: records.len(),
            completed: records
                .values()
                .filter(|r| r.status == TripStatus::Completed)
                .count(),
            failed: records
                .values()
                .filter(|r| r.status == TripStatus::Failed)
                .count(),
        }
    }

    fn purge_older_than(&self, age: Duration) -> usize {
        let cutoff = Utc::now() - age;
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, r| !(r.status.is_terminal() && r.updated_at < cutoff));
        before - records.len()
    }
}
