//! Story repository implementation for SQLite
//!
//! Column names at rest are snake_case; the API-facing camelCase mapping is
//! handled by the HTTP response types, not here.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::application::ports::outbound::StoryRepositoryPort;
use crate::domain::entities::StoryRecord;
use crate::domain::value_objects::{StoryId, StoryLength};

/// One row of the stories table, in column order
type StoryRow = (
    String,         // id
    String,         // title
    String,         // story
    String,         // selected_items (JSON array)
    String,         // theme
    Option<String>, // sub_theme
    String,         // length
    Option<String>, // child_name
    bool,           // is_favorite
    String,         // created_at (RFC 3339)
);

const STORY_COLUMNS: &str =
    "id, title, story, selected_items, theme, sub_theme, length, child_name, is_favorite, created_at";

/// Repository for story persistence
#[derive(Clone)]
pub struct SqliteStoryRepository {
    pool: SqlitePool,
}

impl SqliteStoryRepository {
    pub async fn new(pool: SqlitePool) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS stories (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                story TEXT NOT NULL,
                selected_items TEXT NOT NULL,
                theme TEXT NOT NULL,
                sub_theme TEXT,
                length TEXT NOT NULL,
                child_name TEXT,
                is_favorite INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StoryRepositoryPort for SqliteStoryRepository {
    async fn create(&self, story: &StoryRecord) -> Result<()> {
        let selected_items = serde_json::to_string(&story.selected_items)?;

        sqlx::query(
            "INSERT INTO stories (id, title, story, selected_items, theme, sub_theme, length, \
             child_name, is_favorite, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(story.id.to_string())
        .bind(&story.title)
        .bind(&story.story)
        .bind(selected_items)
        .bind(&story.theme)
        .bind(&story.sub_theme)
        .bind(story.length.as_str())
        .bind(&story.child_name)
        .bind(story.is_favorite)
        .bind(story.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .context("failed to insert story")?;

        tracing::debug!("saved story: {}", story.id);
        Ok(())
    }

    async fn get(&self, id: StoryId) -> Result<Option<StoryRecord>> {
        let row: Option<StoryRow> = sqlx::query_as(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch story")?;

        row.map(row_to_story).transpose()
    }

    async fn list(&self, page: u32, limit: u32) -> Result<(Vec<StoryRecord>, u64)> {
        // Widen before multiplying; u32 page * limit can overflow
        let offset = i64::from(page.max(1) - 1) * i64::from(limit);

        let rows: Vec<StoryRow> = sqlx::query_as(&format!(
            "SELECT {STORY_COLUMNS} FROM stories ORDER BY created_at DESC LIMIT ? OFFSET ?"
        ))
        .bind(i64::from(limit))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .context("failed to list stories")?;

        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM stories")
            .fetch_one(&self.pool)
            .await
            .context("failed to count stories")?;

        let stories = rows.into_iter().map(row_to_story).collect::<Result<_>>()?;
        Ok((stories, total as u64))
    }

    async fn list_favorites(&self) -> Result<Vec<StoryRecord>> {
        let rows: Vec<StoryRow> = sqlx::query_as(&format!(
            "SELECT {STORY_COLUMNS} FROM stories WHERE is_favorite = 1 ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .context("failed to list favorite stories")?;

        rows.into_iter().map(row_to_story).collect()
    }

    async fn set_favorite(&self, id: StoryId, value: bool) -> Result<Option<StoryRecord>> {
        let result = sqlx::query("UPDATE stories SET is_favorite = ? WHERE id = ?")
            .bind(value)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("failed to update favorite flag")?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(id).await
    }

    async fn delete(&self, id: StoryId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM stories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("failed to delete story")?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_story(row: StoryRow) -> Result<StoryRecord> {
    let (id, title, story, selected_items, theme, sub_theme, length, child_name, is_favorite, created_at) =
        row;

    Ok(StoryRecord {
        id: StoryId::from_uuid(Uuid::parse_str(&id).context("invalid story id in database")?),
        title,
        story,
        selected_items: serde_json::from_str(&selected_items)
            .context("invalid selected_items JSON in database")?,
        theme,
        sub_theme,
        length: length
            .parse::<StoryLength>()
            .map_err(|e| anyhow!("invalid length in database: {e}"))?,
        child_name,
        is_favorite,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .context("invalid created_at in database")?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqliteStoryRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteStoryRepository::new(pool).await.unwrap()
    }

    fn story(title: &str, minute: u32) -> StoryRecord {
        let mut record = StoryRecord::new(
            title.to_string(),
            "Once upon a time... The end.".to_string(),
            vec!["dragon".to_string(), "knight".to_string()],
            "funny".to_string(),
            None,
            StoryLength::Short,
            Some("Emma".to_string()),
        );
        record.created_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, minute, 0).unwrap();
        record
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let repo = repository().await;
        let record = story("The Dragon", 0);

        repo.create(&record).await.unwrap();
        let fetched = repo.get(record.id).await.unwrap().unwrap();

        assert_eq!(fetched, record);
        assert!(repo.get(StoryId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_paginated() {
        let repo = repository().await;
        for (i, title) in ["oldest", "middle", "newest"].iter().enumerate() {
            repo.create(&story(title, i as u32)).await.unwrap();
        }

        let (page, total) = repo.list(1, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page[0].title, "newest");
        assert_eq!(page[1].title, "middle");

        let (page, _) = repo.list(2, 2).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "oldest");

        let (beyond, total) = repo.list(5, 2).await.unwrap();
        assert!(beyond.is_empty());
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_list_handles_extreme_page_numbers() {
        let repo = repository().await;
        repo.create(&story("only", 0)).await.unwrap();

        let (stories, total) = repo.list(u32::MAX, 100).await.unwrap();
        assert!(stories.is_empty());
        assert_eq!(total, 1);

        // Page 0 is treated as page 1
        let (stories, _) = repo.list(0, 100).await.unwrap();
        assert_eq!(stories.len(), 1);
    }

    #[tokio::test]
    async fn test_set_favorite_changes_only_that_field() {
        let repo = repository().await;
        let record = story("fav", 0);
        repo.create(&record).await.unwrap();

        let updated = repo.set_favorite(record.id, true).await.unwrap().unwrap();
        assert!(updated.is_favorite);
        assert_eq!(updated.title, record.title);
        assert_eq!(updated.created_at, record.created_at);

        assert!(repo.set_favorite(StoryId::new(), true).await.unwrap().is_none());

        let favorites = repo.list_favorites().await.unwrap();
        assert_eq!(favorites.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repository().await;
        let record = story("gone", 0);
        repo.create(&record).await.unwrap();

        assert!(repo.delete(record.id).await.unwrap());
        assert!(!repo.delete(record.id).await.unwrap());
        assert!(repo.get(record.id).await.unwrap().is_none());
    }
}
