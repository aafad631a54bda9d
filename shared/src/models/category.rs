//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    /// URL-safe form of `name`, always derived by [`slugify`]
    #[serde(default)]
    pub slug: String,
}

/// Create category payload
///
/// A client-provided `slug` is not part of the payload; unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
}

/// Update category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
}

/// Lowercase the name and replace every space and apostrophe with `-`
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '\'' { '-' } else { c })
        .collect()
}
