//! 统一错误处理
//!
//! Re-exports the unified error system from `shared::error` and converts
//! the server's layer errors into [`AppError`].
//!
//! ```ignore
//! Err(AppError::not_found("Product"))
//! Err(AppError::new(ErrorCode::InsufficientStock).with_detail("product_id", 2))
//! ```

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

use crate::auth::JwtError;
use crate::db::StoreError;
use crate::orders::OrderError;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Corrupted(msg) => AppError::with_message(ErrorCode::StorageCorrupted, msg),
            other => AppError::database(other.to_string()),
        }
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NoItems => AppError::new(ErrorCode::OrderEmpty),
            OrderError::InvalidQuantity(pid) => {
                AppError::validation("quantity must be a positive integer")
                    .with_detail("product_id", pid)
            }
            OrderError::ProductNotFound(pid) => {
                AppError::new(ErrorCode::OrderProductNotFound).with_detail("product_id", pid)
            }
            OrderError::InsufficientStock(pid) => {
                AppError::new(ErrorCode::InsufficientStock).with_detail("product_id", pid)
            }
            OrderError::Store(e) => e.into(),
        }
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::InvalidToken(_) | JwtError::InvalidSignature => {
                AppError::invalid_token("Invalid token")
            }
            JwtError::GenerationFailed(msg) | JwtError::ConfigError(msg) => {
                AppError::internal(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_order_errors_carry_product_id() {
        let err: AppError = OrderError::InsufficientStock(2).into();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let details = err.details.expect("details");
        assert_eq!(details["product_id"], serde_json::json!(2));

        let err: AppError = OrderError::ProductNotFound(9).into();
        assert_eq!(err.code, ErrorCode::OrderProductNotFound);
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);

        let err: AppError = OrderError::NoItems.into();
        assert_eq!(err.message, "No items");
    }

    #[test]
    fn test_store_errors_are_server_errors() {
        let err: AppError = StoreError::Corrupted("bad json".into()).into();
        assert_eq!(err.code, ErrorCode::StorageCorrupted);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_jwt_errors_are_401() {
        let err: AppError = JwtError::ExpiredToken.into();
        assert_eq!(err.code, ErrorCode::TokenExpired);
        let err: AppError = JwtError::InvalidSignature.into();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
        assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
    }
}
