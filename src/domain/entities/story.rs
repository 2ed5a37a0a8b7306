//! Story entity - a generated and persisted bedtime story

use chrono::{DateTime, Utc};

use crate::domain::value_objects::{StoryId, StoryLength};

/// A generated bedtime story.
///
/// Stories are immutable once created; only `is_favorite` may change
/// afterwards, via the favorite toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryRecord {
    pub id: StoryId,
    pub title: String,
    pub story: String,
    /// Item catalog ids the caller selected for this story
    pub selected_items: Vec<String>,
    pub theme: String,
    pub sub_theme: Option<String>,
    pub length: StoryLength,
    pub child_name: Option<String>,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl StoryRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        title: String,
        story: String,
        selected_items: Vec<String>,
        theme: String,
        sub_theme: Option<String>,
        length: StoryLength,
        child_name: Option<String>,
    ) -> Self {
        Self {
            id: StoryId::new(),
            title,
            story,
            selected_items,
            theme,
            sub_theme,
            length,
            child_name,
            is_favorite: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_story_is_not_favorite() {
        let story = StoryRecord::new(
            "The Dragon and the Knight".to_string(),
            "Once upon a time...".to_string(),
            vec!["dragon".to_string(), "knight".to_string()],
            "funny".to_string(),
            None,
            StoryLength::Short,
            None,
        );

        assert!(!story.is_favorite);
        assert_eq!(story.selected_items.len(), 2);
    }
}
