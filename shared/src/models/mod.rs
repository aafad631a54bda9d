//! Data models
//!
//! Shared between shop-server and its clients (via API).
//! Field names match the persisted JSON document. All IDs are `u64`.

pub mod category;
pub mod feedback;
pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod session;
pub mod stats;
pub mod user;

// Re-exports
pub use category::*;
pub use feedback::*;
pub use order::*;
pub use product::*;
pub use session::*;
pub use stats::*;
pub use user::*;
