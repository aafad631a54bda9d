//! JSON body extractor
//!
//! Same as [`axum::Json`], but a body that fails to parse or deserialize is
//! answered with `ValidationFailed` (400) in the usual error body instead of
//! axum's plain-text rejection.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, OptionalFromRequest, Request};
use serde::de::DeserializeOwned;

use crate::utils::AppError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

fn rejected(rejection: JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), error = %rejection.body_text(), "JSON body rejected");
    AppError::validation(rejection.body_text())
}

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = <Json<T> as FromRequest<S>>::from_request(req, state).await.map_err(rejected)?;
        Ok(Self(value))
    }
}

/// `Option<AppJson<T>>`: `None` when the request carries no JSON body
impl<T, S> OptionalFromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        let body = <Json<T> as OptionalFromRequest<S>>::from_request(req, state)
            .await
            .map_err(rejected)?;
        Ok(body.map(|Json(value)| Self(value)))
    }
}
