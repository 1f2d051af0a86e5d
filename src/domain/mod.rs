//! Domain types
//!
//! Data model for trip requests, their lifecycle records, and generated
//! itineraries.

pub mod itinerary;
pub mod trip;

pub use itinerary::*;
pub use trip::*;
