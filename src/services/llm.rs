//! Generation client
//!
//! `LlmClient` abstracts over the concrete generative-model provider so the
//! controller (and tests) can swap it. `GenerationClient` wraps a provider
//! with the process-wide rate limiter and the response sanitizing steps:
//! HTML fast-fail and code-fence stripping.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::error::GenerationError;
use crate::prompts::Prompt;
use crate::services::rate_limit::RateLimiter;

/// One external generative-model endpoint.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a prompt and await the raw text response.
    async fn generate(&self, system: &str, user: &str) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;

    fn provider_name(&self) -> &'static str;

    /// Cheap connectivity probe, used at startup and by the health route.
    async fn health_check(&self) -> anyhow::Result<()>;
}

/// Strip Markdown code-fence wrapping from a model response.
///
/// Pure string transform: a payload fenced as json (or bare-fenced) unwraps
/// to the inner text; anything else passes through trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = match trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
    {
        Some(rest) => rest.trim(),
        None => return trimmed,
    };
    match inner.strip_suffix("```") {
        Some(body) => body.trim_end(),
        None => inner,
    }
}

/// Whether a payload is an HTML error page rather than a model response.
fn looks_like_html(text: &str) -> bool {
    let trimmed = text.trim_start();
    trimmed.starts_with("<!DOCTYPE") || trimmed.starts_with("<html")
}

/// Rate-limited, sanitizing wrapper around a provider client.
#[derive(Clone)]
pub struct GenerationClient {
    provider: Arc<dyn LlmClient>,
    limiter: RateLimiter,
}

impl GenerationClient {
    pub fn new(provider: Arc<dyn LlmClient>, limiter: RateLimiter) -> Self {
        Self { provider, limiter }
    }

    pub fn provider(&self) -> &Arc<dyn LlmClient> {
        &self.provider
    }

    /// Send a prompt through the rate limiter and return cleaned response
    /// text, ready for JSON parsing.
    #[instrument(skip_all, fields(provider = self.provider.provider_name()))]
    pub async fn generate(&self, prompt: &Prompt) -> Result<String, GenerationError> {
        self.limiter.wait_for_slot().await;

        let text = self.provider.generate(&prompt.system, &prompt.user).await?;

        // Fast-fail on provider error pages before burning a parse cycle.
        if looks_like_html(&text) {
            return Err(GenerationError::MalformedResponse(
                "provider returned an HTML error page instead of JSON".to_string(),
            ));
        }

        Ok(strip_code_fences(&text).to_string())
    }
}
