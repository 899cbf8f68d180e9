//! Extract and validate a book from a JSON request body.

use crate::error::AppError;
use crate::model::Book;
use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use serde_json::Value;

/// A request body that parsed as JSON and passed the book schema.
/// Rejections (bad JSON, wrong content type, oversized body, schema errors) are [`AppError`]s,
/// so they carry the standard error envelope.
#[derive(Clone, Debug)]
pub struct BookPayload(pub Book);

#[async_trait]
impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<Value>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        Ok(BookPayload(Book::from_payload(body)?))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(rejection.body_text())
    } else {
        AppError::BadRequest(rejection.body_text())
    }
}
