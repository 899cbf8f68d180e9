//! PostgreSQL-backed repository. One statement per operation.

use super::{duplicate_isbn, BookRepository};
use crate::error::AppError;
use crate::model::{Book, BOOKS_TABLE};
use crate::sql;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        PgBookRepository { pool }
    }
}

type BookQuery<'q> = QueryAs<'q, Postgres, Book, PgArguments>;

/// Bind the non-key columns in `BOOKS_TABLE` order.
fn bind_fields<'q>(query: BookQuery<'q>, book: &'q Book) -> BookQuery<'q> {
    query
        .bind(&book.amazon_url)
        .bind(&book.author)
        .bind(&book.language)
        .bind(book.pages)
        .bind(&book.publisher)
        .bind(&book.title)
        .bind(book.year)
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        let sql = sql::select_all(&BOOKS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Book>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>, AppError> {
        let sql = sql::select_by_key(&BOOKS_TABLE);
        tracing::debug!(sql = %sql, isbn, "query");
        let row = sqlx::query_as::<_, Book>(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, book: &Book) -> Result<Book, AppError> {
        let sql = sql::insert(&BOOKS_TABLE);
        tracing::debug!(sql = %sql, isbn = %book.isbn, "query");
        let query = sqlx::query_as::<_, Book>(&sql).bind(&book.isbn);
        match bind_fields(query, book).fetch_one(&self.pool).await {
            Ok(row) => Ok(row),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(duplicate_isbn(&book.isbn)),
            Err(e) => Err(e.into()),
        }
    }

    async fn update(&self, isbn: &str, book: &Book) -> Result<Option<Book>, AppError> {
        let sql = sql::update(&BOOKS_TABLE);
        tracing::debug!(sql = %sql, isbn, "query");
        let query = sqlx::query_as::<_, Book>(&sql).bind(isbn);
        let row = bind_fields(query, book).fetch_optional(&self.pool).await?;
        Ok(row)
    }

    async fn delete_by_isbn(&self, isbn: &str) -> Result<bool, AppError> {
        let sql = sql::delete(&BOOKS_TABLE);
        tracing::debug!(sql = %sql, isbn, "query");
        let deleted: Option<(String,)> = sqlx::query_as(&sql)
            .bind(isbn)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted.is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
