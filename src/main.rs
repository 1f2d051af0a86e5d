use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use traverse_backend::app;
use traverse_backend::config::{self, LlmProvider, SubmissionMode};
use traverse_backend::logging;
use traverse_backend::services::{
    GeminiClient, GenerationClient, InMemoryTripStore, ItineraryGenerator, LlmClient,
    OpenAiClient, RateLimiter, TripStore, TripSubmitter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = config::Settings::from_env()?;

    // Initialize logging
    logging::init_logging(&settings.env);

    tracing::info!(
        env = ?settings.env,
        server_addr = %settings.server_addr,
        provider = ?settings.llm_provider,
        mode = ?settings.submission_mode,
        "Starting Traverse backend"
    );

    // Create the provider client selected by configuration
    let provider: Arc<dyn LlmClient> = match settings.llm_provider {
        LlmProvider::OpenAi => Arc::new(OpenAiClient::new(
            &settings.llm_base_url,
            &settings.llm_api_key,
            &settings.llm_model,
            settings.llm_timeout_seconds,
        )?),
        LlmProvider::Gemini => Arc::new(GeminiClient::new(
            &settings.llm_base_url,
            &settings.llm_api_key,
            &settings.llm_model,
            settings.llm_timeout_seconds,
        )?),
    };

    // Optionally check provider health (non-blocking)
    tokio::spawn({
        let provider = Arc::clone(&provider);
        async move {
            match provider.health_check().await {
                Ok(()) => tracing::info!("LLM provider is healthy"),
                Err(e) => tracing::warn!(error = %e, "LLM provider health check failed - will retry on first request"),
            }
        }
    });

    // Process-wide rate limiter shared by all in-flight generations
    let limiter = RateLimiter::new(
        settings.rate_limit_max_calls,
        Duration::from_secs(settings.rate_limit_window_seconds),
    );
    let generation_client = GenerationClient::new(provider, limiter);

    // Trip store and generation controller
    let store: Arc<dyn TripStore> = Arc::new(InMemoryTripStore::new());
    let generator = Arc::new(ItineraryGenerator::new(
        generation_client.clone(),
        Arc::clone(&store),
        settings.generation_max_retries,
        Duration::from_millis(settings.generation_base_delay_ms),
    ));

    // Submission strategy selected by configuration
    let submitter = match settings.submission_mode {
        SubmissionMode::Inline => TripSubmitter::inline(generator),
        SubmissionMode::Queued => TripSubmitter::queued(generator, settings.queue_workers),
    };

    // Periodic cleanup of expired terminal records
    tokio::spawn({
        let store = Arc::clone(&store);
        let retention = chrono::Duration::days(settings.trip_retention_days);
        async move {
            let mut interval = tokio::time::interval(Duration::from_secs(3600));
            loop {
                interval.tick().await;
                let purged = store.purge_older_than(retention);
                if purged > 0 {
                    tracing::info!(purged, "Purged expired trip records");
                }
            }
        }
    });

    // Create application state
    let state = app::AppState::new(settings.clone(), store, generation_client, submitter);

    // Build application
    let app = app::create_app(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&settings.server_addr).await?;
    tracing::info!("Listening on {}", settings.server_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
