//! Pure helpers for the story generation pipeline

pub mod fallback;
pub mod prompt_builder;

use serde::Deserialize;

/// A `(title, story)` pair, either parsed from the LLM or synthesized
/// by the fallback generator.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoryDraft {
    pub title: String,
    pub story: String,
}
