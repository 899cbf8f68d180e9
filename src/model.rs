//! The book record, its payload schema and its table layout.

use crate::error::AppError;
use crate::service::{whole_i32, FieldRule, RequestValidator, Schema};
use crate::sql::{ColumnDef, TableDef};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: String,
    pub amazon_url: String,
    pub author: String,
    pub language: String,
    #[serde(deserialize_with = "whole_number")]
    pub pages: i32,
    pub publisher: String,
    pub title: String,
    #[serde(deserialize_with = "whole_number")]
    pub year: i32,
}

/// Every field is required on create and on update.
pub const BOOK_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::string("isbn"),
        FieldRule::string("amazon_url"),
        FieldRule::string("author"),
        FieldRule::string("language"),
        FieldRule::integer("pages"),
        FieldRule::string("publisher"),
        FieldRule::string("title"),
        FieldRule::integer("year"),
    ],
};

/// Column order here is the bind order used by the Postgres repository.
pub const BOOKS_TABLE: TableDef = TableDef {
    name: "books",
    key: "isbn",
    columns: &[
        ColumnDef::new("isbn", "TEXT"),
        ColumnDef::new("amazon_url", "TEXT"),
        ColumnDef::new("author", "TEXT"),
        ColumnDef::new("language", "TEXT"),
        ColumnDef::new("pages", "INTEGER"),
        ColumnDef::new("publisher", "TEXT"),
        ColumnDef::new("title", "TEXT"),
        ColumnDef::new("year", "INTEGER"),
    ],
};

impl Book {
    /// Validate a raw JSON payload against [`BOOK_SCHEMA`] and convert it.
    pub fn from_payload(body: Value) -> Result<Self, AppError> {
        RequestValidator::validate(&body, &BOOK_SCHEMA)?;
        serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))
    }

    /// Same record stored under another key.
    pub fn with_isbn(self, isbn: &str) -> Self {
        Book {
            isbn: isbn.to_string(),
            ..self
        }
    }
}

impl<'r> FromRow<'r, PgRow> for Book {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Book {
            isbn: row.try_get("isbn")?,
            amazon_url: row.try_get("amazon_url")?,
            author: row.try_get("author")?,
            language: row.try_get("language")?,
            pages: row.try_get("pages")?,
            publisher: row.try_get("publisher")?,
            title: row.try_get("title")?,
            year: row.try_get("year")?,
        })
    }
}

fn whole_number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = serde_json::Number::deserialize(deserializer)?;
    whole_i32(&n).ok_or_else(|| serde::de::Error::custom(format!("{} is not a 32-bit integer", n)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> Value {
        json!({
            "isbn": "1234567890",
            "amazon_url": "test.com",
            "author": "me",
            "language": "en",
            "pages": 100,
            "publisher": "Houghton",
            "title": "Best Book Ever",
            "year": 2000
        })
    }

    #[test]
    fn converts_valid_payload() {
        let book = Book::from_payload(payload()).unwrap();
        assert_eq!(book.isbn, "1234567890");
        assert_eq!(book.pages, 100);
        assert_eq!(book.year, 2000);
        assert_eq!(serde_json::to_value(&book).unwrap(), payload());
    }

    #[test]
    fn whole_float_pages_are_accepted() {
        let mut body = payload();
        body["pages"] = json!(250.0);
        assert_eq!(Book::from_payload(body).unwrap().pages, 250);
    }

    #[test]
    fn missing_title_is_a_validation_error() {
        let mut body = payload();
        body.as_object_mut().unwrap().remove("title");
        match Book::from_payload(body) {
            Err(AppError::Validation(errors)) => assert_eq!(errors, vec!["title is required".to_string()]),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn schema_and_table_cover_the_same_fields() {
        let schema: Vec<&str> = BOOK_SCHEMA.fields.iter().map(|f| f.name).collect();
        let table: Vec<&str> = BOOKS_TABLE.columns.iter().map(|c| c.name).collect();
        assert_eq!(schema, table);
        assert_eq!(BOOKS_TABLE.key, "isbn");
    }

    #[test]
    fn with_isbn_rekeys_only_the_isbn() {
        let book = Book::from_payload(payload()).unwrap();
        let moved = book.clone().with_isbn("0987654321");
        assert_eq!(moved.isbn, "0987654321");
        assert_eq!(moved.title, book.title);
    }
}
