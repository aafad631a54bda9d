//! Repository Module
//!
//! CRUD operations over the collections of the shop document. Each
//! repository wraps the shared [`Database`]; every mutating call is one
//! `Database::write` unit of work and commits atomically.

pub mod category;
pub mod feedback;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

// Re-exports
pub use category::CategoryRepository;
pub use feedback::FeedbackRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use session::{SessionLookup, SessionRepository};
pub use user::{NewUser, UserRepository};

use super::Database;

/// Base repository with database reference
#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Database,
}

impl BaseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
