//! Application configuration

use std::env;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite connection string
    pub database_url: String,

    /// Chat-completions API base URL (OpenAI-compatible)
    pub llm_base_url: String,
    /// Model for story generation requests
    pub llm_model: String,
    /// API key; a missing key is recoverable at request time via the
    /// fallback story, so it is not required at startup
    pub llm_api_key: Option<String>,
    /// Bound on each upstream generation call, in seconds
    pub llm_timeout_secs: u64,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://stories.db?mode=rwc".to_string()),

            llm_base_url: env::var("LLM_BASE_URL")
                .unwrap_or_else(|_| "https://apps.abacus.ai/v1".to_string()),
            llm_model: env::var("LLM_MODEL")
                .unwrap_or_else(|_| "grok-4-1-fast-non-reasoning".to_string()),
            llm_api_key: env::var("LLM_API_KEY").ok(),
            llm_timeout_secs: env::var("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
