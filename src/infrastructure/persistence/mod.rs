//! SQLite persistence adapters

mod story_repository;

pub use story_repository::SqliteStoryRepository;
