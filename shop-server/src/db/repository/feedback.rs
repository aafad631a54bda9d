//! Feedback Repository - likes and comments

use shared::models::{Comment, CommentCreate, Like, LikeToggle};

use super::BaseRepository;
use super::product::not_found;
use crate::db::Database;
use crate::utils::validation::{MAX_NOTE_LEN, validate_required_text};
use crate::utils::AppResult;

#[derive(Debug, Clone)]
pub struct FeedbackRepository {
    base: BaseRepository,
}

impl FeedbackRepository {
    pub fn new(db: Database) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Like or unlike a product. The product counter follows and never
    /// drops below zero.
    pub async fn toggle_like(
        &self,
        user_id: u64,
        product_id: u64,
        now_secs: i64,
    ) -> AppResult<LikeToggle> {
        self.base
            .db()
            .write(|snap| {
                if snap.product(product_id).is_none() {
                    return Err(not_found(product_id));
                }
                let existing = snap
                    .likes
                    .iter()
                    .position(|l| l.user_id == user_id && l.product_id == product_id);
                let liked = match existing {
                    Some(index) => {
                        snap.likes.remove(index);
                        false
                    }
                    None => {
                        snap.likes.push(Like {
                            user_id,
                            product_id,
                            created_at: now_secs,
                        });
                        true
                    }
                };

                let product = snap.product_mut(product_id).ok_or_else(|| not_found(product_id))?;
                product.likes = if liked {
                    product.likes.saturating_add(1)
                } else {
                    product.likes.saturating_sub(1)
                };
                Ok(LikeToggle {
                    liked,
                    likes: product.likes,
                })
            })
            .await
    }

    /// Add a comment; rating is clamped to 0..=5
    pub async fn add_comment(
        &self,
        user_id: u64,
        product_id: u64,
        data: CommentCreate,
        now_secs: i64,
    ) -> AppResult<Comment> {
        validate_required_text(&data.content, "content", MAX_NOTE_LEN)?;
        let rating = data.clamped_rating();

        self.base
            .db()
            .write(|snap| {
                if snap.product(product_id).is_none() {
                    return Err(not_found(product_id));
                }
                let comment = Comment {
                    id: snap.next_comment_id(),
                    product_id,
                    user_id,
                    content: data.content,
                    rating,
                    created_at: now_secs,
                };
                snap.comments.push(comment.clone());
                Ok(comment)
            })
            .await
    }

    /// Comments of a product, oldest first
    pub async fn comments_for(&self, product_id: u64) -> AppResult<Vec<Comment>> {
        let snap = self.base.db().read().await?;
        Ok(snap
            .comments
            .into_iter()
            .filter(|c| c.product_id == product_id)
            .collect())
    }
}
