//! Prompt building functions for story generation

use crate::domain::value_objects::{ChildGender, StoryLength};

/// System instruction establishing the storyteller persona and JSON-only output
pub const SYSTEM_PROMPT: &str = "You are a wholesome storyteller for young children (ages 3-10). \
    Create safe, positive stories with traditional values and happy endings. \
    Always respond with valid JSON only, following the exact format specified.";

/// Approximate word target for each story length.
///
/// Targets are a design choice, not a hard contract, but stay monotonic:
/// short < medium < long.
pub fn word_target(length: StoryLength) -> u32 {
    match length {
        StoryLength::Short => 800,
        StoryLength::Medium => 1200,
        StoryLength::Long => 2000,
    }
}

/// Derive the protagonist description from the optional personalization.
///
/// Priority order: name and gender, name only, gender only, neither.
pub fn protagonist_phrase(child_name: Option<&str>, child_gender: Option<ChildGender>) -> String {
    match (child_name, child_gender) {
        (Some(name), Some(gender)) => format!("{name}, a {gender}"),
        (Some(name), None) => name.to_string(),
        (None, Some(gender)) => format!("a curious {gender}"),
        (None, None) => "a curious child".to_string(),
    }
}

/// Theme-specific narrative guidance, refined by sub-theme where the theme
/// supports one.
///
/// Guidance is advisory: an unrecognized sub-theme falls back to the theme's
/// default entry rather than erroring.
pub fn theme_guidance(theme_name: &str, sub_theme_name: Option<&str>) -> &'static str {
    match theme_name {
        "Funny" => {
            "- Create humorous situations with silly, lighthearted moments\n\
             - Include playful dialogue and funny mishaps\n\
             - Make children laugh with gentle comedy appropriate for bedtime\n\
             - End with a satisfying, happy resolution"
        }
        "Magical" => {
            "- Include fantasy elements like magic, enchantment, or wonder\n\
             - Create a sense of whimsy and imagination\n\
             - Use magical transformations or discoveries\n\
             - Make the magical elements feel special and delightful"
        }
        "Life Lessons" => match sub_theme_name {
            Some("Honesty") => {
                "- Teach the value of telling the truth through the story\n\
                 - Show how honesty builds trust and solves problems\n\
                 - Demonstrate consequences of dishonesty and rewards of truthfulness\n\
                 - Make the lesson natural, not preachy"
            }
            Some("Loyalty") => {
                "- Teach about being faithful to friends and family\n\
                 - Show characters supporting each other through challenges\n\
                 - Demonstrate the value of keeping promises\n\
                 - Illustrate how loyalty strengthens relationships"
            }
            Some("Kindness") => {
                "- Show acts of compassion and caring for others\n\
                 - Demonstrate how kindness makes everyone feel good\n\
                 - Include helping someone in need\n\
                 - Show the positive impact of kind actions"
            }
            Some("Respect") => {
                "- Teach treating others with courtesy and consideration\n\
                 - Show characters listening to and valuing each other\n\
                 - Demonstrate good manners in a natural, fun way\n\
                 - Show how respect earns respect in return"
            }
            Some("Gratitude") => {
                "- Teach being thankful for what we have\n\
                 - Show characters appreciating friends, family, and small joys\n\
                 - Include a moment of saying thank you that matters\n\
                 - Make thankfulness feel warm, not obligatory"
            }
            Some("Perseverance") => {
                "- Teach never giving up when things get hard\n\
                 - Show a character trying, failing, and trying again\n\
                 - Demonstrate how practice and patience pay off\n\
                 - Celebrate effort as much as success"
            }
            // Friendship doubles as the default lesson
            _ => {
                "- Show the importance of being a good friend\n\
                 - Demonstrate sharing, caring, and supporting friends\n\
                 - Include moments of friendship challenges and resolution\n\
                 - Highlight how friends help each other"
            }
        },
        "Learning" => match sub_theme_name {
            Some("Science") => {
                "- Teach how everyday things work through playful discovery\n\
                 - Include a simple experiment or observation in the story\n\
                 - Spark curiosity about asking questions and finding answers\n\
                 - Keep facts small, concrete, and fun"
            }
            Some("History") => {
                "- Teach about the past and important events in a gentle way\n\
                 - Visit a long-ago time or meet a figure from history\n\
                 - Include one or two memorable, age-appropriate facts\n\
                 - Make the past feel like an exciting place to explore"
            }
            Some("Geography") => {
                "- Teach about different places, countries, or landmarks\n\
                 - Include interesting geographical facts in a fun way\n\
                 - Explore different cultures or environments\n\
                 - Make learning about the world exciting and accessible"
            }
            Some("Ocean") => {
                "- Teach about sea creatures and underwater ecosystems\n\
                 - Include fascinating facts about ocean animals\n\
                 - Explore coral reefs, deep sea, or coastal environments\n\
                 - Make marine life educational and engaging"
            }
            Some("Seasons") => {
                "- Teach about the changing seasons and weather\n\
                 - Show how nature transforms through the year\n\
                 - Include sensory details of each season visited\n\
                 - Make weather and seasons feel wondrous"
            }
            // Animals doubles as the default topic
            _ => {
                "- Teach about animals and their habitats\n\
                 - Include interesting animal behaviors and characteristics\n\
                 - Explore how animals live, eat, and interact\n\
                 - Make wildlife learning fun and memorable"
            }
        },
        _ => {
            "- Create an engaging, age-appropriate narrative\n\
             - Include positive messages and happy endings"
        }
    }
}

/// Build the user prompt for one generation request.
pub fn build_story_prompt(
    item_names: &[&str],
    theme_name: &str,
    sub_theme_name: Option<&str>,
    length: StoryLength,
    protagonist: &str,
) -> String {
    let word_count = word_target(length);
    let guidance = theme_guidance(theme_name, sub_theme_name);

    let mut prompt = String::new();

    prompt.push_str(
        "You are a wholesome storyteller creating bedtime stories for young children (ages 3-10). \
         Always generate safe, positive, and engaging stories with happy endings. \
         Use simple, fun language that's easy to read aloud.\n\n",
    );

    prompt.push_str("**Story Inputs**:\n");
    prompt.push_str(&format!("- **Protagonist**: {protagonist}\n"));
    prompt.push_str(&format!(
        "- **Characters/Items to Include**: {}\n",
        item_names.join(", ")
    ));
    match sub_theme_name {
        Some(sub) => prompt.push_str(&format!("- **Theme**: {theme_name} - {sub}\n")),
        None => prompt.push_str(&format!("- **Theme**: {theme_name}\n")),
    }
    prompt.push_str(&format!(
        "- **Target Length**: {word_count} words (aim for approximately {word_count} words \
         with short sentences and vivid descriptions)\n\n",
    ));

    prompt.push_str("**Theme-Specific Guidance**:\n");
    prompt.push_str(guidance);
    prompt.push_str("\n\n");

    prompt.push_str("**Strict Safeguards - Follow these rules exactly, no exceptions**:\n");
    prompt.push_str(
        "1. Stories must be completely appropriate for kids: no violence, scary elements, \
         monsters that aren't friendly, death, injury, bad language, romance, or anything \
         frightening or upsetting.\n",
    );
    prompt.push_str(
        "2. If characters have genders, use traditional binary pronouns (he/she) based on \
         classic archetypes (e.g., a brave boy knight, a kind girl fairy).\n",
    );
    prompt.push_str(
        "3. If the inputs don't fit naturally, adapt them positively without adding unsafe \
         elements.\n",
    );
    prompt.push_str("4. End every story on an uplifting note, reinforcing positivity.\n");
    prompt.push_str("5. Incorporate ALL listed characters/items naturally into the story.\n");
    prompt.push_str(&format!(
        "6. Make {protagonist} the hero/main character of the story.\n\n"
    ));

    prompt.push_str("**Story Format**:\n");
    prompt.push_str("- Start with \"Once upon a time...\"\n");
    prompt.push_str("- End with \"The end.\"\n");
    prompt.push_str("- Use 3-4 short paragraphs with vivid descriptions to spark imagination\n");
    prompt.push_str("- Keep sentences short and easy to read aloud\n\n");

    prompt.push_str("**Output Format**:\n");
    prompt.push_str("Provide your response in JSON format with exactly this structure:\n");
    prompt.push_str(
        "{\n  \"title\": \"An original, engaging story title that reflects the adventure\",\n  \
         \"story\": \"The complete story text starting with 'Once upon a time...' and ending \
         with 'The end.' Use \\n\\n between paragraphs.\"\n}",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_targets_are_monotonic() {
        assert!(word_target(StoryLength::Short) < word_target(StoryLength::Medium));
        assert!(word_target(StoryLength::Medium) < word_target(StoryLength::Long));
    }

    #[test]
    fn test_protagonist_phrase_priority_order() {
        assert_eq!(
            protagonist_phrase(Some("Emma"), Some(ChildGender::Girl)),
            "Emma, a girl"
        );
        assert_eq!(protagonist_phrase(Some("Emma"), None), "Emma");
        assert_eq!(
            protagonist_phrase(None, Some(ChildGender::Boy)),
            "a curious boy"
        );
        assert_eq!(protagonist_phrase(None, None), "a curious child");
    }

    #[test]
    fn test_unknown_sub_theme_falls_back_to_default_guidance() {
        let unknown = theme_guidance("Life Lessons", Some("Bravery"));
        let default = theme_guidance("Life Lessons", None);
        assert_eq!(unknown, default);
        assert!(default.contains("good friend"));

        let unknown = theme_guidance("Learning", Some("Algebra"));
        assert!(unknown.contains("animals"));
    }

    #[test]
    fn test_prompt_contains_inputs_and_contract() {
        let prompt = build_story_prompt(
            &["Dragon", "Knight", "Castle"],
            "Funny",
            None,
            StoryLength::Short,
            "Emma, a girl",
        );

        assert!(prompt.contains("Dragon, Knight, Castle"));
        assert!(prompt.contains("**Theme**: Funny\n"));
        assert!(prompt.contains("800 words"));
        assert!(prompt.contains("Emma, a girl"));
        assert!(prompt.contains("Once upon a time"));
        assert!(prompt.contains("The end."));
        assert!(prompt.contains("\"title\""));
        assert!(prompt.contains("\"story\""));
    }

    #[test]
    fn test_prompt_includes_sub_theme_and_its_guidance() {
        let prompt = build_story_prompt(
            &["Bunny"],
            "Life Lessons",
            Some("Honesty"),
            StoryLength::Long,
            "a curious child",
        );

        assert!(prompt.contains("Life Lessons - Honesty"));
        assert!(prompt.contains("telling the truth"));
        assert!(prompt.contains("2000 words"));
    }
}
