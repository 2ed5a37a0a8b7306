//! Application services - Use case implementations
//!
//! Services accept their collaborators (LLM client, repository) by plain
//! construction and return domain entities or small result structs.

pub mod llm;
pub mod story_service;

pub use story_service::{
    GenerateStoryRequest, StoryPage, StoryService, StoryServiceError,
};
