use thiserror::Error;

use crate::auth::JwtError;
use crate::db::StoreError;

/// Startup and serving errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Server task failed: {0}")]
    Join(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<JwtError> for ServerError {
    fn from(err: JwtError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Join(err.to_string())
    }
}

/// Server 层的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
