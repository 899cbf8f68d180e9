//! Bookstore server: reads settings from env, bootstraps the `books` table, serves the API.

use bookstore::{app, ensure_books_table, ensure_database_exists, AppState, Backend, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("bookstore=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = match settings.backend {
        Backend::Postgres => {
            ensure_database_exists(&settings.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(&settings.database_url)
                .await?;
            ensure_books_table(&pool).await?;
            AppState::postgres(pool)
        }
        Backend::Memory => {
            tracing::warn!("using in-memory book storage; data is lost on exit");
            AppState::in_memory()
        }
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state, settings.body_limit_bytes)).await?;
    Ok(())
}
