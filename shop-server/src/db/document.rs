//! Persisted document layout

use serde::{Deserialize, Serialize};
use shared::models::{Category, Comment, Like, Order, Product, Session, Stats, User};

/// In-memory copy of the persisted document
///
/// Missing collections deserialize as empty. Top-level keys this server does
/// not know about are carried through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub catalogue: Vec<Product>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: Vec<Like>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default)]
    pub sequences: Sequences,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Last id handed out per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequences {
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub categories: u64,
    #[serde(default)]
    pub products: u64,
    #[serde(default)]
    pub orders: u64,
    #[serde(default)]
    pub comments: u64,
}

/// `max(counter, highest existing id) + 1`, stored back into the counter.
///
/// Counters never move backwards, so ids freed by deletions are not reused.
/// Documents written before counters existed are seeded from their ids.
fn allocate(counter: &mut u64, existing: impl Iterator<Item = u64>) -> u64 {
    let next = existing.fold(*counter, u64::max) + 1;
    *counter = next;
    next
}

impl Snapshot {
    pub fn next_user_id(&mut self) -> u64 {
        allocate(&mut self.sequences.users, self.users.iter().map(|u| u.id))
    }

    pub fn next_category_id(&mut self) -> u64 {
        allocate(
            &mut self.sequences.categories,
            self.categories.iter().map(|c| c.id),
        )
    }

    pub fn next_product_id(&mut self) -> u64 {
        allocate(
            &mut self.sequences.products,
            self.catalogue.iter().map(|p| p.id),
        )
    }

    pub fn next_order_id(&mut self) -> u64 {
        allocate(&mut self.sequences.orders, self.orders.iter().map(|o| o.id))
    }

    pub fn next_comment_id(&mut self) -> u64 {
        allocate(
            &mut self.sequences.comments,
            self.comments.iter().map(|c| c.id),
        )
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.catalogue.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: u64) -> Option<&mut Product> {
        self.catalogue.iter_mut().find(|p| p.id == id)
    }

    pub fn category(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }
}
