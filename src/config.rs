use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Which generative-model provider backs the generation client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAi,
    Gemini,
}

impl LlmProvider {
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => anyhow::bail!("Unknown LLM_PROVIDER '{}' (expected openai or gemini)", other),
        }
    }
}

/// How trip submissions are executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionMode {
    /// Run generation synchronously inside the request handler
    Inline,
    /// Hand the job to the background worker pool and return immediately
    Queued,
}

impl SubmissionMode {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "queued" | "queue" => Self::Queued,
            _ => Self::Inline,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // LLM provider
    pub llm_provider: LlmProvider,
    pub llm_api_key: String,
    pub llm_model: String,
    pub llm_base_url: String,
    pub llm_timeout_seconds: u64,

    // Generation controller
    pub generation_max_retries: u32,
    pub generation_base_delay_ms: u64,

    // Rate limiting
    pub rate_limit_max_calls: usize,
    pub rate_limit_window_seconds: u64,

    // Submission
    pub submission_mode: SubmissionMode,
    pub queue_workers: usize,

    // Store retention
    pub trip_retention_days: i64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // LLM provider
        let llm_provider = LlmProvider::from_str(
            &env::var("LLM_PROVIDER").unwrap_or_else(|_| "openai".to_string()),
        )?;
        let llm_api_key = env::var("LLM_API_KEY").context("LLM_API_KEY must be set")?;
        let llm_model = env::var("LLM_MODEL").unwrap_or_else(|_| match llm_provider {
            LlmProvider::OpenAi => "gpt-4o-mini".to_string(),
            LlmProvider::Gemini => "gemini-pro".to_string(),
        });
        let llm_base_url = env::var("LLM_BASE_URL").unwrap_or_else(|_| match llm_provider {
            LlmProvider::OpenAi => "https://api.openai.com".to_string(),
            LlmProvider::Gemini => "https://generativelanguage.googleapis.com".to_string(),
        });
        let llm_timeout_seconds = env::var("LLM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60); // 1 minute bound per generation attempt

        // Generation controller
        let generation_max_retries = env::var("GENERATION_MAX_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3);
        let generation_base_delay_ms = env::var("GENERATION_BASE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1000);

        // Rate limiting
        let rate_limit_max_calls = env::var("RATE_LIMIT_MAX_CALLS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60); // 60 calls per minute default
        let rate_limit_window_seconds = env::var("RATE_LIMIT_WINDOW_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        // Submission
        let submission_mode = SubmissionMode::from_str(
            &env::var("SUBMISSION_MODE").unwrap_or_else(|_| "inline".to_string()),
        );
        let queue_workers = env::var("QUEUE_WORKERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);

        // Store retention
        let trip_retention_days = env::var("TRIP_RETENTION_DAYS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            llm_provider,
            llm_api_key,
            llm_model,
            llm_base_url,
            llm_timeout_seconds,
            generation_max_retries,
            generation_base_delay_ms,
            rate_limit_max_calls,
            rate_limit_window_seconds,
            submission_mode,
            queue_workers,
            trip_retention_days,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parsing() {
        assert_eq!(LlmProvider::from_str("openai").unwrap(), LlmProvider::OpenAi);
        assert_eq!(LlmProvider::from_str("Gemini").unwrap(), LlmProvider::Gemini);
        assert!(LlmProvider::from_str("cohere").is_err());
    }

    #[test]
    fn submission_mode_defaults_to_inline() {
        assert_eq!(SubmissionMode::from_str("queued"), SubmissionMode::Queued);
        assert_eq!(SubmissionMode::from_str("anything"), SubmissionMode::Inline);
    }
}
