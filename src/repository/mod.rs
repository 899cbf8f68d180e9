//! Data access for the `books` table. Handlers only see the [`BookRepository`] trait.

mod memory;
mod postgres;

pub use memory::InMemoryBookRepository;
pub use postgres::PgBookRepository;

use crate::error::AppError;
use crate::model::Book;
use async_trait::async_trait;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books ordered by isbn; empty when the table is empty.
    async fn list_all(&self) -> Result<Vec<Book>, AppError>;

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError>;

    /// Insert a new row. Fails with [`AppError::Conflict`] when the isbn is taken.
    async fn create(&self, book: &Book) -> Result<Book, AppError>;

    /// Overwrite every non-key column of the row stored under `isbn`.
    /// `book.isbn` is ignored; returns `None` when no row matches.
    async fn update(&self, isbn: &str, book: &Book) -> Result<Option<Book>, AppError>;

    /// Returns whether a row was removed.
    async fn delete_by_isbn(&self, isbn: &str) -> Result<bool, AppError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}

pub(crate) fn duplicate_isbn(isbn: &str) -> AppError {
    AppError::Conflict(format!("book with isbn '{}' already exists", isbn))
}
