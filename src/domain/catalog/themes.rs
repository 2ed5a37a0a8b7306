//! Theme catalog - narrative categories and their sub-themes

use serde::Serialize;

use super::ValidationError;

/// A refinement of a theme, e.g. a specific life lesson or learning topic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Top-level narrative category.
///
/// A theme either has no sub-categories (a sub-theme must not be supplied)
/// or one or more (a sub-theme is mandatory and must belong to it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub has_sub_categories: bool,
    pub sub_categories: &'static [SubCategory],
}

/// The full theme catalog, immutable for the process lifetime
pub const THEMES: &[Theme] = &[
    Theme {
        id: "funny",
        name: "Funny",
        description: "Humorous, lighthearted stories with silly situations that make kids laugh",
        has_sub_categories: false,
        sub_categories: &[],
    },
    Theme {
        id: "magical",
        name: "Magical",
        description: "Fantasy tales filled with wonder, enchantment, and magical adventures",
        has_sub_categories: false,
        sub_categories: &[],
    },
    Theme {
        id: "life_lessons",
        name: "Life Lessons",
        description: "Stories that teach important values through engaging narratives",
        has_sub_categories: true,
        sub_categories: &[
            SubCategory {
                id: "honesty",
                name: "Honesty",
                description: "Learning the importance of telling the truth",
            },
            SubCategory {
                id: "friendship",
                name: "Friendship",
                description: "Understanding how to be a good friend",
            },
            SubCategory {
                id: "loyalty",
                name: "Loyalty",
                description: "Being faithful and supportive to friends and family",
            },
            SubCategory {
                id: "kindness",
                name: "Kindness",
                description: "Showing compassion and care for others",
            },
            SubCategory {
                id: "respect",
                name: "Respect",
                description: "Treating others with courtesy and consideration",
            },
            SubCategory {
                id: "gratitude",
                name: "Gratitude",
                description: "Being thankful and appreciating what we have",
            },
            SubCategory {
                id: "perseverance",
                name: "Perseverance",
                description: "Never giving up and working hard to achieve goals",
            },
        ],
    },
    Theme {
        id: "learning",
        name: "Learning",
        description: "Educational stories that teach about the world around us",
        has_sub_categories: true,
        sub_categories: &[
            SubCategory {
                id: "science",
                name: "Science",
                description: "Discovering how things work through experiments and exploration",
            },
            SubCategory {
                id: "history",
                name: "History",
                description: "Learning about the past and important events",
            },
            SubCategory {
                id: "geography",
                name: "Geography",
                description: "Exploring different places, countries, and landmarks",
            },
            SubCategory {
                id: "animals",
                name: "Animals",
                description: "Learning about animals and their habitats",
            },
            SubCategory {
                id: "ocean",
                name: "Ocean",
                description: "Discovering sea creatures and underwater ecosystems",
            },
            SubCategory {
                id: "seasons",
                name: "Seasons",
                description: "Understanding the changing seasons and weather",
            },
        ],
    },
];

/// All catalog themes
pub fn all() -> &'static [Theme] {
    THEMES
}

/// Look up a theme by id
pub fn find(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.id == id)
}

/// Look up a sub-category within a theme
pub fn find_sub(theme_id: &str, sub_id: &str) -> Option<&'static SubCategory> {
    find(theme_id)?.sub_categories.iter().find(|s| s.id == sub_id)
}

/// Validate a theme/sub-theme pair and resolve both to catalog entries.
///
/// Checks run in order: unknown theme, missing mandatory sub-theme,
/// sub-theme supplied for a theme without sub-categories, sub-theme not
/// belonging to the theme.
pub fn validate(
    theme_id: &str,
    sub_theme_id: Option<&str>,
) -> Result<(&'static Theme, Option<&'static SubCategory>), ValidationError> {
    let theme = find(theme_id).ok_or_else(|| ValidationError::UnknownTheme(theme_id.to_string()))?;

    let available = || theme.sub_categories.iter().map(|s| s.id.to_string()).collect();

    match sub_theme_id {
        None if theme.has_sub_categories => Err(ValidationError::SubThemeRequired {
            theme: theme.name.to_string(),
            available: available(),
        }),
        None => Ok((theme, None)),
        Some(_) if !theme.has_sub_categories => {
            Err(ValidationError::SubThemeNotSupported(theme.name.to_string()))
        }
        Some(sub_id) => match find_sub(theme_id, sub_id) {
            Some(sub) => Ok((theme, Some(sub))),
            None => Err(ValidationError::UnknownSubTheme {
                theme: theme.name.to_string(),
                sub_theme: sub_id.to_string(),
                available: available(),
            }),
        },
    }
}
