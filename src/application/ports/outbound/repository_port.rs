//! Repository ports - Interfaces for data persistence
//!
//! Application services depend on these traits, not concrete implementations.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::StoryRecord;
use crate::domain::value_objects::StoryId;

/// Repository port for story persistence
#[async_trait]
pub trait StoryRepositoryPort: Send + Sync {
    /// Persist a newly generated story
    async fn create(&self, story: &StoryRecord) -> Result<()>;

    /// Get a story by ID
    async fn get(&self, id: StoryId) -> Result<Option<StoryRecord>>;

    /// List stories newest-first; returns the page and the total count
    async fn list(&self, page: u32, limit: u32) -> Result<(Vec<StoryRecord>, u64)>;

    /// List favorited stories newest-first
    async fn list_favorites(&self) -> Result<Vec<StoryRecord>>;

    /// Set the favorite flag; returns the updated record, or None if missing
    async fn set_favorite(&self, id: StoryId, value: bool) -> Result<Option<StoryRecord>>;

    /// Delete a story; returns false if it did not exist
    async fn delete(&self, id: StoryId) -> Result<bool>;
}
