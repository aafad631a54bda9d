//! Order placement
//!
//! - **processor**: validate → deduct stock → append to the ledger → rank,
//!   as one unit of work over a [`Snapshot`](crate::db::Snapshot)
//! - **ranking**: best-seller list maintenance
//! - **money**: decimal arithmetic for order totals
//! - **access**: who may read or change which orders
//!
//! # Data Flow
//!
//! ```text
//! POST /api/orders → OrderRepository::place → Database::write
//!                                               ├─ processor::place_order
//!                                               │     ├─ validation pass (read only)
//!                                               │     ├─ mutation pass (stock)
//!                                               │     ├─ ledger append
//!                                               │     └─ ranking::record_sale
//!                                               └─ commit (atomic)
//! ```

pub mod access;
pub mod error;
pub mod money;
pub mod processor;
pub mod ranking;

pub use access::OrderAccess;
pub use error::OrderError;
pub use processor::place_order;
