use thiserror::Error;

use crate::db::StoreError;

/// Order placement errors
///
/// Every variant except `Store` is raised before the snapshot is touched.
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("No items")]
    NoItems,

    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(u64),

    #[error("Product not found: {0}")]
    ProductNotFound(u64),

    #[error("Insufficient stock for product {0}")]
    InsufficientStock(u64),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
