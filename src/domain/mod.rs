//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: StoryRecord
//! - Value Objects: StoryId, StoryLength, ChildGender
//! - Catalog: static item and theme tables plus pure validation over them

pub mod catalog;
pub mod entities;
pub mod value_objects;
