//! Database bootstrap: create the database and the `books` table when missing.

use crate::error::{AppError, ConfigError};
use crate::model::BOOKS_TABLE;
use crate::sql;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// `CREATE TABLE IF NOT EXISTS books`. Existing tables are left untouched.
pub async fn ensure_books_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = sql::create_table(&BOOKS_TABLE);
    tracing::debug!(sql = %ddl, "ensure table");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Connect to the `postgres` maintenance database and create the target database if absent.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_database_url(database_url, e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn invalid_database_url(url: &str, reason: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        var: "DATABASE_URL",
        value: url.to_string(),
        reason,
    })
}

/// Split a connection URL into (maintenance URL, database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let scheme_end = url.find("://").map(|i| i + 3).unwrap_or(0);
    let path_start = url[scheme_end..]
        .find('/')
        .map(|i| scheme_end + i + 1)
        .ok_or_else(|| invalid_database_url(url, "no database path".into()))?;
    let path_and_query = &url[path_start..];
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, q)) => (name.trim(), Some(q)),
        None => (path_and_query.trim(), None),
    };
    let mut admin_url = format!("{}postgres", &url[..path_start]);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/bookstore").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "bookstore");
    }

    #[test]
    fn keeps_query_string_on_admin_url() {
        let (admin, name) = parse_db_name_from_url("postgres://localhost/books?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://localhost/postgres?sslmode=disable");
        assert_eq!(name, "books");
    }

    #[test]
    fn url_without_path_is_a_config_error() {
        let err = parse_db_name_from_url("postgres://localhost").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::Invalid { var: "DATABASE_URL", .. })
        ));
        assert_eq!(err.status_and_code().1, "config_error");
    }
}
