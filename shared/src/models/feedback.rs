//! Likes and comments

use serde::{Deserialize, Serialize};

/// Highest accepted comment rating
pub const MAX_RATING: u8 = 5;

/// Product comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub product_id: u64,
    pub user_id: u64,
    pub content: String,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub created_at: i64,
}

/// Product like, at most one per (user, product)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub user_id: u64,
    pub product_id: u64,
    #[serde(default)]
    pub created_at: i64,
}

/// Create comment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentCreate {
    #[serde(default)]
    pub content: String,
    /// Clamped to `0..=5`
    #[serde(default)]
    pub rating: i64,
}

impl CommentCreate {
    pub fn clamped_rating(&self) -> u8 {
        self.rating.clamp(0, MAX_RATING as i64) as u8
    }
}

/// Result of toggling a like
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeToggle {
    /// Whether the caller now likes the product
    pub liked: bool,
    /// Product like counter after the toggle
    pub likes: u32,
}
