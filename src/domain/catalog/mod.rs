//! Static catalogs of selectable story material
//!
//! Items and themes are compiled-in tables, loaded once and never mutated.
//! Validation over them is pure: no I/O, no side effects. A validation
//! failure is terminal for the request; nothing downstream runs.

pub mod items;
pub mod themes;

pub use items::{Item, ItemCategory};
pub use themes::{SubCategory, Theme};

/// Structured rejection of a generation request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("At least 1 item must be selected")]
    NoItems,

    #[error("Maximum 10 items can be selected")]
    TooManyItems,

    /// Carries every unknown id, not just the first one found.
    #[error("Invalid items: {}", .0.join(", "))]
    UnknownItems(Vec<String>),

    #[error("Invalid theme: {0}")]
    UnknownTheme(String),

    #[error("Theme '{theme}' requires a sub-theme. Available: {}", available.join(", "))]
    SubThemeRequired {
        theme: String,
        available: Vec<String>,
    },

    #[error("Theme '{0}' does not have sub-categories")]
    SubThemeNotSupported(String),

    #[error("Invalid sub-theme '{sub_theme}' for theme '{theme}'. Available: {}", available.join(", "))]
    UnknownSubTheme {
        theme: String,
        sub_theme: String,
        available: Vec<String>,
    },
}
