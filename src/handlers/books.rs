//! Book CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{BookPayload, IsbnPath};
use crate::response::{book_created, book_ok, books_ok, message_ok};
use crate::state::AppState;
use axum::{
    extract::State,
    response::IntoResponse,
};

fn not_found(isbn: &str) -> AppError {
    AppError::NotFound(format!("book with isbn '{}'", isbn))
}

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let books = state.books.list_all().await?;
    Ok(books_ok(books))
}

pub async fn read(
    State(state): State<AppState>,
    IsbnPath(isbn): IsbnPath,
) -> Result<impl IntoResponse, AppError> {
    let book = state
        .books
        .get_by_isbn(&isbn)
        .await?
        .ok_or_else(|| not_found(&isbn))?;
    Ok(book_ok(book))
}

pub async fn create(
    State(state): State<AppState>,
    BookPayload(book): BookPayload,
) -> Result<impl IntoResponse, AppError> {
    let row = state.books.create(&book).await?;
    tracing::info!(isbn = %row.isbn, "book created");
    Ok(book_created(row))
}

/// Full overwrite of the row at the path isbn; the body isbn does not rekey it.
pub async fn update(
    State(state): State<AppState>,
    IsbnPath(isbn): IsbnPath,
    BookPayload(book): BookPayload,
) -> Result<impl IntoResponse, AppError> {
    if book.isbn != isbn {
        tracing::debug!(path = %isbn, body = %book.isbn, "body isbn differs from path; keeping path");
    }
    let row = state
        .books
        .update(&isbn, &book)
        .await?
        .ok_or_else(|| not_found(&isbn))?;
    Ok(book_ok(row))
}

pub async fn delete(
    State(state): State<AppState>,
    IsbnPath(isbn): IsbnPath,
) -> Result<impl IntoResponse, AppError> {
    if !state.books.delete_by_isbn(&isbn).await? {
        return Err(not_found(&isbn));
    }
    tracing::info!(isbn = %isbn, "book deleted");
    Ok(message_ok("Book deleted"))
}
