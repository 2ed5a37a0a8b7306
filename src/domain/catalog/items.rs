//! Item catalog - characters, places, and objects selectable as story material

use serde::Serialize;

use super::ValidationError;

/// Category an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemCategory {
    Creature,
    Person,
    Place,
    Object,
    Vehicle,
    Food,
    Nature,
}

/// A selectable character or item used as story material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: &'static str,
    pub name: &'static str,
    pub category: ItemCategory,
    pub emoji: &'static str,
}

/// The full item catalog, immutable for the process lifetime
pub const ITEMS: &[Item] = &[
    // Creatures
    Item { id: "dragon", name: "Dragon", category: ItemCategory::Creature, emoji: "🐉" },
    Item { id: "bunny", name: "Bunny", category: ItemCategory::Creature, emoji: "🐰" },
    Item { id: "horse", name: "Horse", category: ItemCategory::Creature, emoji: "🐴" },
    Item { id: "unicorn", name: "Unicorn", category: ItemCategory::Creature, emoji: "🦄" },
    Item { id: "butterfly", name: "Butterfly", category: ItemCategory::Creature, emoji: "🦋" },
    Item { id: "badger", name: "Badger", category: ItemCategory::Creature, emoji: "🦡" },
    Item { id: "cricket", name: "Cricket", category: ItemCategory::Creature, emoji: "🦗" },
    Item { id: "bear", name: "Bear", category: ItemCategory::Creature, emoji: "🐻" },
    Item { id: "bee", name: "Bee", category: ItemCategory::Creature, emoji: "🐝" },
    Item { id: "dog", name: "Dog", category: ItemCategory::Creature, emoji: "🐕" },
    Item { id: "cat", name: "Cat", category: ItemCategory::Creature, emoji: "🐱" },
    Item { id: "mouse", name: "Mouse", category: ItemCategory::Creature, emoji: "🐭" },
    Item { id: "worm", name: "Worm", category: ItemCategory::Creature, emoji: "🪱" },
    Item { id: "eagle", name: "Eagle", category: ItemCategory::Creature, emoji: "🦅" },
    Item { id: "pegasus", name: "Pegasus", category: ItemCategory::Creature, emoji: "🦄" },
    Item { id: "owl", name: "Owl", category: ItemCategory::Creature, emoji: "🦉" },
    Item { id: "elephant", name: "Elephant", category: ItemCategory::Creature, emoji: "🐘" },
    Item { id: "penguin", name: "Penguin", category: ItemCategory::Creature, emoji: "🐧" },
    Item { id: "dolphin", name: "Dolphin", category: ItemCategory::Creature, emoji: "🐬" },
    Item { id: "panda", name: "Panda", category: ItemCategory::Creature, emoji: "🐼" },
    Item { id: "fox", name: "Fox", category: ItemCategory::Creature, emoji: "🦊" },
    Item { id: "wolf", name: "Wolf", category: ItemCategory::Creature, emoji: "🐺" },
    // People
    Item { id: "knight", name: "Knight", category: ItemCategory::Person, emoji: "🤺" },
    Item { id: "king", name: "King", category: ItemCategory::Person, emoji: "🤴" },
    Item { id: "queen", name: "Queen", category: ItemCategory::Person, emoji: "👸" },
    Item { id: "princess", name: "Princess", category: ItemCategory::Person, emoji: "👑" },
    Item { id: "prince", name: "Prince", category: ItemCategory::Person, emoji: "🤴" },
    Item { id: "fairy", name: "Fairy", category: ItemCategory::Person, emoji: "🧚" },
    Item { id: "pirate", name: "Pirate", category: ItemCategory::Person, emoji: "🏴‍☠️" },
    Item { id: "wizard", name: "Wizard", category: ItemCategory::Person, emoji: "🧙" },
    // Places
    Item { id: "castle", name: "Castle", category: ItemCategory::Place, emoji: "🏰" },
    Item { id: "house", name: "House", category: ItemCategory::Place, emoji: "🏠" },
    Item { id: "tree-house", name: "Tree House", category: ItemCategory::Place, emoji: "🏡" },
    // Objects
    Item { id: "magic umbrella", name: "Magic Umbrella", category: ItemCategory::Object, emoji: "☂️" },
    Item { id: "treasure", name: "Treasure", category: ItemCategory::Object, emoji: "💰" },
    Item { id: "book", name: "Book", category: ItemCategory::Object, emoji: "📚" },
    // Vehicles
    Item { id: "pirate ship", name: "Pirate Ship", category: ItemCategory::Vehicle, emoji: "🏴‍☠️" },
    Item { id: "spaceship", name: "Spaceship", category: ItemCategory::Vehicle, emoji: "🚀" },
    Item { id: "sports car", name: "Sports Car", category: ItemCategory::Vehicle, emoji: "🏎️" },
    // Food
    Item { id: "cheese", name: "Cheese", category: ItemCategory::Food, emoji: "🧀" },
    Item { id: "cake", name: "Cake", category: ItemCategory::Food, emoji: "🍰" },
    // Nature
    Item { id: "rainbow", name: "Rainbow", category: ItemCategory::Nature, emoji: "🌈" },
    Item { id: "mushroom", name: "Mushroom", category: ItemCategory::Nature, emoji: "🍄" },
    Item { id: "moon", name: "Moon", category: ItemCategory::Nature, emoji: "🌙" },
    Item { id: "sun", name: "Sun", category: ItemCategory::Nature, emoji: "☀️" },
    Item { id: "star", name: "Star", category: ItemCategory::Nature, emoji: "⭐" },
    Item { id: "cloud", name: "Cloud", category: ItemCategory::Nature, emoji: "☁️" },
    Item { id: "rain", name: "Rain", category: ItemCategory::Nature, emoji: "🌧️" },
    Item { id: "flower", name: "Flower", category: ItemCategory::Nature, emoji: "🌸" },
    Item { id: "tree", name: "Tree", category: ItemCategory::Nature, emoji: "🌳" },
];

/// All catalog items
pub fn all() -> &'static [Item] {
    ITEMS
}

/// Look up a single item by id
pub fn find(id: &str) -> Option<&'static Item> {
    ITEMS.iter().find(|item| item.id == id)
}

/// Validate the selected ids and resolve them to catalog entries.
///
/// Collects every unknown id before rejecting, so the caller sees the
/// complete list rather than the first failure.
pub fn resolve(selected: &[String]) -> Result<Vec<&'static Item>, ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::NoItems);
    }
    if selected.len() > 10 {
        return Err(ValidationError::TooManyItems);
    }

    let unknown: Vec<String> = selected
        .iter()
        .filter(|id| find(id).is_none())
        .cloned()
        .collect();

    if !unknown.is_empty() {
        return Err(ValidationError::UnknownItems(unknown));
    }

    Ok(selected.iter().filter_map(|id| find(id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_items() {
        let ids = vec!["dragon".to_string(), "knight".to_string()];
        let items = resolve(&ids).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "Dragon");
        assert_eq!(items[1].name, "Knight");
    }

    #[test]
    fn test_resolve_reports_every_unknown_id() {
        let ids = vec![
            "dragon".to_string(),
            "ghost".to_string(),
            "knight".to_string(),
            "zombie".to_string(),
        ];
        let err = resolve(&ids).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownItems(vec!["ghost".to_string(), "zombie".to_string()])
        );
        assert!(err.to_string().contains("ghost"));
        assert!(err.to_string().contains("zombie"));
    }

    #[test]
    fn test_resolve_enforces_item_count() {
        assert_eq!(resolve(&[]).unwrap_err(), ValidationError::NoItems);

        let too_many: Vec<String> = std::iter::repeat("dragon".to_string()).take(11).collect();
        assert_eq!(resolve(&too_many).unwrap_err(), ValidationError::TooManyItems);
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let mut ids: Vec<&str> = ITEMS.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), ITEMS.len());
    }
}
