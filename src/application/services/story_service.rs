//! Story Service - The generation pipeline and story CRUD use cases
//!
//! The pipeline runs strictly in order: validate against the static
//! catalogs, build the prompt, call the LLM, fall back to a deterministic
//! story on any upstream failure, persist, respond. Upstream failures are
//! never surfaced to the caller; the product decision is to always deliver
//! *a* story even when it cannot be *the requested* story.

use crate::application::ports::outbound::{
    ChatMessage, LlmPort, LlmRequest, MessageRole, StoryRepositoryPort,
};
use crate::application::services::llm::{fallback, prompt_builder, StoryDraft};
use crate::domain::catalog::{self, ValidationError};
use crate::domain::entities::StoryRecord;
use crate::domain::value_objects::{ChildGender, StoryId, StoryLength};

/// Words that flag a story for operator review. Advisory only: a match is
/// logged, never blocked.
const UNSAFE_WORDS: &[&str] = &[
    "scary",
    "frightening",
    "terrifying",
    "horror",
    "nightmare",
    "afraid",
    "fear",
];

/// Sampling parameters for story generation
const TEMPERATURE: f32 = 0.8;
const MAX_TOKENS: u32 = 3000;

/// One story generation request, already deserialized from the API body
#[derive(Debug, Clone)]
pub struct GenerateStoryRequest {
    pub selected_items: Vec<String>,
    pub theme: String,
    pub sub_theme: Option<String>,
    pub length: StoryLength,
    pub child_name: Option<String>,
    pub child_gender: Option<ChildGender>,
}

/// One page of stories with pagination metadata
#[derive(Debug, Clone)]
pub struct StoryPage {
    pub stories: Vec<StoryRecord>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

/// Errors surfaced to the caller by the story service
#[derive(Debug, thiserror::Error)]
pub enum StoryServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Story with ID {0} not found")]
    NotFound(StoryId),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Failures on the generation path. Recovered locally by the fallback
/// generator; the concrete cause is only logged.
#[derive(Debug, thiserror::Error)]
enum GenerationError {
    #[error("LLM call failed: {0}")]
    Llm(String),

    #[error("LLM response was not valid JSON: {0}")]
    MalformedResponse(String),

    #[error("LLM response is missing required field '{0}'")]
    MissingField(&'static str),
}

/// Service orchestrating story generation and management
pub struct StoryService<L: LlmPort, R: StoryRepositoryPort> {
    llm: L,
    repository: R,
}

impl<L: LlmPort, R: StoryRepositoryPort> StoryService<L, R> {
    pub fn new(llm: L, repository: R) -> Self {
        Self { llm, repository }
    }

    /// Run the full generation pipeline and persist the result.
    ///
    /// Validation failures are terminal: no external call is made and
    /// nothing is persisted. Upstream failures are masked by the fallback.
    pub async fn generate_story(
        &self,
        request: GenerateStoryRequest,
    ) -> Result<StoryRecord, StoryServiceError> {
        tracing::info!(
            theme = %request.theme,
            sub_theme = ?request.sub_theme,
            length = %request.length,
            "generating story"
        );

        let items = catalog::items::resolve(&request.selected_items)?;
        let (theme, sub_theme) =
            catalog::themes::validate(&request.theme, request.sub_theme.as_deref())?;

        let item_names: Vec<&str> = items.iter().map(|item| item.name).collect();
        let protagonist = prompt_builder::protagonist_phrase(
            request.child_name.as_deref(),
            request.child_gender,
        );
        let sub_theme_name = sub_theme.map(|sub| sub.name);

        let draft = match self
            .generate_with_llm(&item_names, theme.name, sub_theme_name, request.length, &protagonist)
            .await
        {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("story generation failed, using fallback story: {e}");
                fallback::fallback_story(&item_names, theme.name, sub_theme_name, &protagonist)
            }
        };

        let record = StoryRecord::new(
            draft.title,
            draft.story,
            request.selected_items,
            request.theme,
            request.sub_theme,
            request.length,
            request.child_name,
        );

        self.repository.create(&record).await?;
        tracing::info!(story_id = %record.id, "story generated and saved");

        Ok(record)
    }

    /// Call the LLM and shape its output into a story draft
    async fn generate_with_llm(
        &self,
        item_names: &[&str],
        theme_name: &str,
        sub_theme_name: Option<&str>,
        length: StoryLength,
        protagonist: &str,
    ) -> Result<StoryDraft, GenerationError> {
        let prompt = prompt_builder::build_story_prompt(
            item_names,
            theme_name,
            sub_theme_name,
            length,
            protagonist,
        );

        let llm_request = LlmRequest::new(vec![ChatMessage {
            role: MessageRole::User,
            content: prompt,
        }])
        .with_system_prompt(prompt_builder::SYSTEM_PROMPT)
        .with_temperature(TEMPERATURE)
        .with_max_tokens(MAX_TOKENS)
        .with_json_response();

        let response = self
            .llm
            .generate(llm_request)
            .await
            .map_err(|e| GenerationError::Llm(e.to_string()))?;

        let draft = parse_story_draft(&response.content)?;

        let flagged = scan_for_unsafe_words(&draft.story);
        if !flagged.is_empty() {
            tracing::warn!(words = ?flagged, "potentially unsafe content detected in story");
        }

        Ok(draft)
    }

    pub async fn get_story(&self, id: StoryId) -> Result<StoryRecord, StoryServiceError> {
        self.repository
            .get(id)
            .await?
            .ok_or(StoryServiceError::NotFound(id))
    }

    pub async fn list_stories(
        &self,
        page: u32,
        limit: u32,
    ) -> Result<StoryPage, StoryServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);

        let (stories, total) = self.repository.list(page, limit).await?;
        let total_pages = total.div_ceil(u64::from(limit)) as u32;

        Ok(StoryPage {
            stories,
            total,
            page,
            total_pages,
        })
    }

    pub async fn list_favorite_stories(&self) -> Result<Vec<StoryRecord>, StoryServiceError> {
        Ok(self.repository.list_favorites().await?)
    }

    /// Flip the favorite flag; no other field changes.
    pub async fn toggle_favorite(&self, id: StoryId) -> Result<StoryRecord, StoryServiceError> {
        let story = self.get_story(id).await?;

        self.repository
            .set_favorite(id, !story.is_favorite)
            .await?
            .ok_or(StoryServiceError::NotFound(id))
    }

    pub async fn delete_story(&self, id: StoryId) -> Result<(), StoryServiceError> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(StoryServiceError::NotFound(id))
        }
    }
}

/// Parse the LLM payload into a story draft, tolerating a surrounding
/// markdown code fence.
fn parse_story_draft(content: &str) -> Result<StoryDraft, GenerationError> {
    let payload = strip_code_fence(content.trim());

    let draft: StoryDraft = serde_json::from_str(payload)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    if draft.title.trim().is_empty() {
        return Err(GenerationError::MissingField("title"));
    }
    if draft.story.trim().is_empty() {
        return Err(GenerationError::MissingField("story"));
    }

    Ok(draft)
}

fn strip_code_fence(content: &str) -> &str {
    let Some(rest) = content.strip_prefix("```") else {
        return content;
    };
    // Drop the info string ("json") and the closing fence
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.trim_start_matches(['\r', '\n'])
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

/// Case-insensitive scan of the story text against the denylist
fn scan_for_unsafe_words(story: &str) -> Vec<&'static str> {
    let lower = story.to_lowercase();
    UNSAFE_WORDS
        .iter()
        .filter(|word| lower.contains(*word))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Mock LLM returning a canned outcome
    enum MockLlm {
        Unavailable,
        Respond(&'static str),
    }

    #[async_trait]
    impl LlmPort for MockLlm {
        type Error = String;

        async fn generate(
            &self,
            _request: LlmRequest,
        ) -> Result<crate::application::ports::outbound::LlmResponse, Self::Error> {
            match self {
                MockLlm::Unavailable => Err("connection refused".to_string()),
                MockLlm::Respond(content) => {
                    Ok(crate::application::ports::outbound::LlmResponse {
                        content: content.to_string(),
                        model: "mock".to_string(),
                        tokens_used: 0,
                    })
                }
            }
        }
    }

    /// In-memory repository mirroring the SQLite implementation's semantics
    #[derive(Default)]
    struct MockRepository {
        stories: Mutex<Vec<StoryRecord>>,
    }

    #[async_trait]
    impl StoryRepositoryPort for MockRepository {
        async fn create(&self, story: &StoryRecord) -> Result<()> {
            self.stories.lock().unwrap().push(story.clone());
            Ok(())
        }

        async fn get(&self, id: StoryId) -> Result<Option<StoryRecord>> {
            Ok(self
                .stories
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.id == id)
                .cloned())
        }

        async fn list(&self, page: u32, limit: u32) -> Result<(Vec<StoryRecord>, u64)> {
            let mut stories = self.stories.lock().unwrap().clone();
            stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let total = stories.len() as u64;
            let offset = (u64::from(page.max(1) - 1) * u64::from(limit)) as usize;
            let page_items = stories
                .into_iter()
                .skip(offset)
                .take(limit as usize)
                .collect();
            Ok((page_items, total))
        }

        async fn list_favorites(&self) -> Result<Vec<StoryRecord>> {
            let mut stories: Vec<StoryRecord> = self
                .stories
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.is_favorite)
                .cloned()
                .collect();
            stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(stories)
        }

        async fn set_favorite(&self, id: StoryId, value: bool) -> Result<Option<StoryRecord>> {
            let mut stories = self.stories.lock().unwrap();
            match stories.iter_mut().find(|s| s.id == id) {
                Some(story) => {
                    story.is_favorite = value;
                    Ok(Some(story.clone()))
                }
                None => Ok(None),
            }
        }

        async fn delete(&self, id: StoryId) -> Result<bool> {
            let mut stories = self.stories.lock().unwrap();
            let before = stories.len();
            stories.retain(|s| s.id != id);
            Ok(stories.len() < before)
        }
    }

    fn request(theme: &str, sub_theme: Option<&str>) -> GenerateStoryRequest {
        GenerateStoryRequest {
            selected_items: vec!["dragon".to_string(), "knight".to_string()],
            theme: theme.to_string(),
            sub_theme: sub_theme.map(String::from),
            length: StoryLength::Short,
            child_name: None,
            child_gender: None,
        }
    }

    const GOOD_PAYLOAD: &str = r#"{"title": "The Brave Knight", "story": "Once upon a time, a dragon and a knight became friends.\n\nThe end."}"#;

    #[tokio::test]
    async fn test_generate_story_uses_llm_result() {
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), MockRepository::default());

        let story = service.generate_story(request("funny", None)).await.unwrap();

        assert_eq!(story.title, "The Brave Knight");
        assert!(story.story.starts_with("Once upon a time"));
        assert!(!story.is_favorite);
    }

    #[tokio::test]
    async fn test_generate_story_falls_back_when_llm_unavailable() {
        let service = StoryService::new(MockLlm::Unavailable, MockRepository::default());

        let story = service.generate_story(request("funny", None)).await.unwrap();

        assert!(story.story.starts_with("Once upon a time"));
        assert!(story.story.contains("Dragon"));
        assert!(story.story.contains("Knight"));
        assert!(!story.is_favorite);

        // The fallback story was persisted and is retrievable
        let fetched = service.get_story(story.id).await.unwrap();
        assert_eq!(fetched, story);
    }

    #[tokio::test]
    async fn test_generate_story_falls_back_on_malformed_payload() {
        let service = StoryService::new(
            MockLlm::Respond("this is not json"),
            MockRepository::default(),
        );

        let story = service.generate_story(request("funny", None)).await.unwrap();
        assert!(story.story.starts_with("Once upon a time"));
    }

    #[tokio::test]
    async fn test_generate_story_accepts_fenced_payload() {
        let fenced = "```json\n{\"title\": \"T\", \"story\": \"Once upon a time... The end.\"}\n```";
        let service = StoryService::new(MockLlm::Respond(fenced), MockRepository::default());

        let story = service.generate_story(request("funny", None)).await.unwrap();
        assert_eq!(story.title, "T");
    }

    #[tokio::test]
    async fn test_validation_failure_skips_generation_and_persistence() {
        let repository = MockRepository::default();
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), repository);

        let mut bad = request("funny", None);
        bad.selected_items.push("ghost".to_string());
        let err = service.generate_story(bad).await.unwrap_err();
        assert!(matches!(err, StoryServiceError::Validation(_)));
        assert!(err.to_string().contains("ghost"));

        let err = service
            .generate_story(request("life_lessons", None))
            .await
            .unwrap_err();
        assert!(matches!(err, StoryServiceError::Validation(_)));

        let page = service.list_stories(1, 10).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_toggle_favorite_is_idempotent_over_two_calls() {
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), MockRepository::default());
        let story = service.generate_story(request("funny", None)).await.unwrap();

        let toggled = service.toggle_favorite(story.id).await.unwrap();
        assert!(toggled.is_favorite);
        assert_eq!(toggled.title, story.title);

        let toggled_back = service.toggle_favorite(story.id).await.unwrap();
        assert!(!toggled_back.is_favorite);
    }

    #[tokio::test]
    async fn test_toggle_favorite_missing_story() {
        let service = StoryService::new(MockLlm::Unavailable, MockRepository::default());
        let err = service.toggle_favorite(StoryId::new()).await.unwrap_err();
        assert!(matches!(err, StoryServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_stories_pagination() {
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), MockRepository::default());
        for _ in 0..5 {
            service.generate_story(request("funny", None)).await.unwrap();
        }

        let page = service.list_stories(1, 2).await.unwrap();
        assert_eq!(page.stories.len(), 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);

        let last = service.list_stories(3, 2).await.unwrap();
        assert_eq!(last.stories.len(), 1);

        // A page beyond the last returns an empty list, not an error
        let beyond = service.list_stories(4, 2).await.unwrap();
        assert!(beyond.stories.is_empty());
        assert_eq!(beyond.total_pages, 3);

        // Even an absurdly large page number is just an empty page
        let extreme = service.list_stories(u32::MAX, 100).await.unwrap();
        assert!(extreme.stories.is_empty());
        assert_eq!(extreme.total, 5);
    }

    #[tokio::test]
    async fn test_list_favorites_only_returns_favorites() {
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), MockRepository::default());
        let first = service.generate_story(request("funny", None)).await.unwrap();
        let _second = service.generate_story(request("magical", None)).await.unwrap();

        service.toggle_favorite(first.id).await.unwrap();

        let favorites = service.list_favorite_stories().await.unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_story() {
        let service = StoryService::new(MockLlm::Respond(GOOD_PAYLOAD), MockRepository::default());
        let story = service.generate_story(request("funny", None)).await.unwrap();

        service.delete_story(story.id).await.unwrap();

        let err = service.delete_story(story.id).await.unwrap_err();
        assert!(matches!(err, StoryServiceError::NotFound(_)));
    }

    #[test]
    fn test_parse_story_draft_rejects_missing_fields() {
        assert!(matches!(
            parse_story_draft(r#"{"title": "T"}"#),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_story_draft(r#"{"title": "", "story": "s"}"#),
            Err(GenerationError::MissingField("title"))
        ));
        assert!(matches!(
            parse_story_draft(r#"{"title": "T", "story": "  "}"#),
            Err(GenerationError::MissingField("story"))
        ));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("{\"a\": 1}"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn test_scan_for_unsafe_words() {
        assert!(scan_for_unsafe_words("A happy little tale.").is_empty());

        let flagged = scan_for_unsafe_words("It was a Scary night full of NIGHTMARE fuel.");
        assert_eq!(flagged, vec!["scary", "nightmare"]);
    }
}
