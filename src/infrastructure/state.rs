//! Shared application state

use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePoolOptions;

use crate::application::services::StoryService;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm::ChatCompletionsClient;
use crate::infrastructure::persistence::SqliteStoryRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub story_service: StoryService<ChatCompletionsClient, SqliteStoryRepository>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        // Initialize SQLite repository
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&config.database_url)
            .await
            .context("failed to connect to database")?;
        let repository = SqliteStoryRepository::new(pool)
            .await
            .context("failed to initialize story repository")?;

        // Initialize chat completions client
        let llm_client = ChatCompletionsClient::new(
            &config.llm_base_url,
            &config.llm_model,
            config.llm_api_key.clone(),
            Duration::from_secs(config.llm_timeout_secs),
        );

        let story_service = StoryService::new(llm_client, repository);

        Ok(Self {
            config,
            story_service,
        })
    }
}
