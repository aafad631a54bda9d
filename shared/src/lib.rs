//! Shared types for the shop backend
//!
//! Common types used by shop-server and its HTTP clients: domain models,
//! error types, response structures, and API DTOs.

pub mod client;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
