//! In-memory repository for tests and database-less local runs.

use super::{duplicate_isbn, BookRepository};
use crate::error::AppError;
use crate::model::Book;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// Books keyed by isbn; iteration order matches the Postgres `ORDER BY isbn`.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: RwLock<BTreeMap<String, Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError> {
        Ok(self.books.read().await.get(isbn).cloned())
    }

    async fn create(&self, book: &Book) -> Result<Book, AppError> {
        let mut books = self.books.write().await;
        if books.contains_key(&book.isbn) {
            return Err(duplicate_isbn(&book.isbn));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(book.clone())
    }

    async fn update(&self, isbn: &str, book: &Book) -> Result<Option<Book>, AppError> {
        let mut books = self.books.write().await;
        match books.get_mut(isbn) {
            Some(stored) => {
                *stored = book.clone().with_isbn(isbn);
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<bool, AppError> {
        Ok(self.books.write().await.remove(isbn).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
