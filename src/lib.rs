//! Bookstore: REST backend for a single validated `books` table on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Backend, Settings};
pub use error::{AppError, ConfigError};
pub use model::{Book, BOOK_SCHEMA};
pub use repository::{BookRepository, InMemoryBookRepository, PgBookRepository};
pub use routes::{app, book_routes, common_routes};
pub use service::RequestValidator;
pub use state::AppState;
pub use store::{ensure_books_table, ensure_database_exists};
