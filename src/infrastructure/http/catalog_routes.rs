//! Catalog API routes
//!
//! The item and theme catalogs are static data compiled into the binary, so
//! these handlers are infallible.

use axum::Json;

use crate::domain::catalog::{self, Item, Theme};

/// List the selectable story items
pub async fn list_items() -> Json<&'static [Item]> {
    Json(catalog::items::all())
}

/// List the available story themes
pub async fn list_themes() -> Json<&'static [Theme]> {
    Json(catalog::themes::all())
}
