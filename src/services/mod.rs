//! Core services
//!
//! Generation clients, the rate limiter, the retry controller, the trip
//! store, and the submission façade.

pub mod gemini;
pub mod generator;
pub mod llm;
pub mod openai;
pub mod queue;
pub mod rate_limit;
pub mod store;
pub mod submit;

pub use gemini::GeminiClient;
pub use generator::ItineraryGenerator;
pub use llm::{GenerationClient, LlmClient};
pub use openai::OpenAiClient;
pub use rate_limit::RateLimiter;
pub use store::{InMemoryTripStore, TripStore};
pub use submit::{SubmissionOutcome, TripSubmitter};
