//! Story API routes

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::{GenerateStoryRequest, StoryServiceError};
use crate::domain::entities::StoryRecord;
use crate::domain::value_objects::{ChildGender, StoryId, StoryLength};
use crate::infrastructure::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateStoryRequestBody {
    pub selected_items: Vec<String>,
    pub theme: String,
    #[serde(default)]
    pub sub_theme: Option<String>,
    pub length: StoryLength,
    #[serde(default)]
    pub child_name: Option<String>,
    #[serde(default)]
    pub child_gender: Option<ChildGender>,
}

#[derive(Debug, Deserialize)]
pub struct ListStoriesQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub story: String,
    pub selected_items: Vec<String>,
    pub theme: String,
    pub sub_theme: Option<String>,
    pub length: StoryLength,
    pub child_name: Option<String>,
    pub is_favorite: bool,
    pub created_at: String,
}

impl From<StoryRecord> for StoryResponse {
    fn from(record: StoryRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            story: record.story,
            selected_items: record.selected_items,
            theme: record.theme,
            sub_theme: record.sub_theme,
            length: record.length,
            child_name: record.child_name,
            is_favorite: record.is_favorite,
            created_at: record.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedStoriesResponse {
    pub stories: Vec<StoryResponse>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

#[derive(Debug, Serialize)]
pub struct FavoriteStoriesResponse {
    pub stories: Vec<StoryResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: String,
    pub is_favorite: bool,
}

fn map_service_error(err: StoryServiceError) -> (StatusCode, String) {
    let status = match &err {
        StoryServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        StoryServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        StoryServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn parse_story_id(id: &str) -> Result<StoryId, (StatusCode, String)> {
    Uuid::parse_str(id)
        .map(StoryId::from_uuid)
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid story ID".to_string()))
}

/// Generate a new story and save it
pub async fn generate_story(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateStoryRequestBody>,
) -> Result<Json<StoryResponse>, (StatusCode, String)> {
    let story = state
        .story_service
        .generate_story(GenerateStoryRequest {
            selected_items: req.selected_items,
            theme: req.theme,
            sub_theme: req.sub_theme,
            length: req.length,
            child_name: req.child_name,
            child_gender: req.child_gender,
        })
        .await
        .map_err(map_service_error)?;

    Ok(Json(StoryResponse::from(story)))
}

/// List saved stories, newest first
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListStoriesQuery>,
) -> Result<Json<PaginatedStoriesResponse>, (StatusCode, String)> {
    let page = state
        .story_service
        .list_stories(query.page, query.limit)
        .await
        .map_err(map_service_error)?;

    Ok(Json(PaginatedStoriesResponse {
        stories: page.stories.into_iter().map(StoryResponse::from).collect(),
        total: page.total,
        page: page.page,
        total_pages: page.total_pages,
    }))
}

/// List favorite stories
pub async fn list_favorite_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FavoriteStoriesResponse>, (StatusCode, String)> {
    let stories = state
        .story_service
        .list_favorite_stories()
        .await
        .map_err(map_service_error)?;

    Ok(Json(FavoriteStoriesResponse {
        stories: stories.into_iter().map(StoryResponse::from).collect(),
    }))
}

/// Get a story by ID
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoryResponse>, (StatusCode, String)> {
    let story_id = parse_story_id(&id)?;

    let story = state
        .story_service
        .get_story(story_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(StoryResponse::from(story)))
}

/// Toggle the favorite flag on a story
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteResponse>, (StatusCode, String)> {
    let story_id = parse_story_id(&id)?;

    let story = state
        .story_service
        .toggle_favorite(story_id)
        .await
        .map_err(map_service_error)?;

    Ok(Json(FavoriteResponse {
        id: story.id.to_string(),
        is_favorite: story.is_favorite,
    }))
}

/// Delete a story
pub async fn delete_story(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let story_id = parse_story_id(&id)?;

    state
        .story_service
        .delete_story(story_id)
        .await
        .map_err(map_service_error)?;

    Ok(StatusCode::NO_CONTENT)
}
