//! Shared application state for all routes.

use crate::repository::{BookRepository, InMemoryBookRepository, PgBookRepository};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BookRepository>,
}

impl AppState {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        AppState { books }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self::new(Arc::new(PgBookRepository::new(pool)))
    }

    /// Empty in-memory store; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryBookRepository::new()))
    }
}
