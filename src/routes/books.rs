//! Book CRUD routes.

use crate::handlers::books;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn book_routes(state: AppState) -> Router {
    Router::new()
        .route("/books", get(books::list).post(books::create))
        .route(
            "/books/:isbn",
            get(books::read).put(books::update).delete(books::delete),
        )
        .with_state(state)
}
