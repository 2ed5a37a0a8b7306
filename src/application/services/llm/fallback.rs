//! Fallback story generator
//!
//! Deterministic, side-effect-free construction of a minimally valid story
//! when the upstream generation call fails. This is the terminal safety net
//! of the pipeline: it must never fail.

use super::StoryDraft;

/// Synthesize a story honoring the same structural contract as a successful
/// generation: fixed opening and closing phrases, the protagonist centered,
/// the first few selected items mentioned by name, the theme reflected.
pub fn fallback_story(
    item_names: &[&str],
    theme_name: &str,
    sub_theme_name: Option<&str>,
    protagonist: &str,
) -> StoryDraft {
    let item_list = item_names
        .iter()
        .take(3)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    let others = if item_names.len() > 3 { " and others" } else { "" };
    let theme_desc = match sub_theme_name {
        Some(sub) => format!("{theme_name} - {sub}").to_lowercase(),
        None => theme_name.to_lowercase(),
    };

    StoryDraft {
        title: format!("{protagonist}'s {theme_name} Adventure"),
        story: format!(
            "Once upon a time, {protagonist} embarked on a wonderful {theme_desc} adventure.\n\n\
             Along the way, they met many friends including {item_list}{others}. Together, they \
             had the most amazing time exploring and learning. Each friend brought something \
             special to the journey, making it truly magical.\n\n\
             As the sun began to set, {protagonist} felt happy and grateful for all the new \
             friends and experiences. With a warm heart and sleepy eyes, it was time to rest \
             and dream of tomorrow's adventures.\n\n\
             The end. Sweet dreams!"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_deterministic() {
        let a = fallback_story(&["Dragon", "Knight"], "Funny", None, "a curious child");
        let b = fallback_story(&["Dragon", "Knight"], "Funny", None, "a curious child");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_honors_the_structural_contract() {
        let draft = fallback_story(
            &["Dragon", "Knight", "Castle", "Rainbow"],
            "Magical",
            None,
            "Emma, a girl",
        );

        assert!(draft.story.starts_with("Once upon a time"));
        assert!(draft.story.ends_with("Sweet dreams!"));
        assert!(draft.story.contains("Dragon, Knight, Castle"));
        assert!(draft.story.contains("and others"));
        assert!(draft.story.contains("Emma, a girl"));
        assert!(draft.story.contains("magical"));
        assert_eq!(draft.title, "Emma, a girl's Magical Adventure");
    }

    #[test]
    fn test_fallback_reflects_sub_theme() {
        let draft = fallback_story(
            &["Bunny"],
            "Life Lessons",
            Some("Kindness"),
            "a curious boy",
        );

        assert!(draft.story.contains("life lessons - kindness"));
        assert!(!draft.story.contains("and others"));
    }
}
