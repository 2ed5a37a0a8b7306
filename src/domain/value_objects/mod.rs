//! Value objects - Immutable objects defined by their attributes

mod ids;
mod story_options;

pub use ids::StoryId;
pub use story_options::{ChildGender, StoryLength};
