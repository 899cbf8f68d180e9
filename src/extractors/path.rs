//! Path key extractor that rejects with [`AppError`].

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// The `:isbn` path segment.
#[derive(Clone, Debug)]
pub struct IsbnPath(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for IsbnPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(isbn) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::warn!(rejection = ?rejection, "path rejected");
                AppError::BadRequest(rejection.body_text())
            })?;
        Ok(IsbnPath(isbn))
    }
}
