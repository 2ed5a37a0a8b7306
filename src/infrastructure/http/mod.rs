//! HTTP REST API routes

mod catalog_routes;
mod story_routes;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

pub use catalog_routes::*;
pub use story_routes::*;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Story routes
        .route(
            "/api/stories/generate",
            post(story_routes::generate_story),
        )
        .route("/api/stories", get(story_routes::list_stories))
        .route(
            "/api/stories/favorites",
            get(story_routes::list_favorite_stories),
        )
        .route("/api/stories/{id}", get(story_routes::get_story))
        .route(
            "/api/stories/{id}/favorite",
            patch(story_routes::toggle_favorite),
        )
        .route("/api/stories/{id}", delete(story_routes::delete_story))
        // Catalog routes
        .route("/api/items", get(catalog_routes::list_items))
        .route("/api/themes", get(catalog_routes::list_themes))
}
