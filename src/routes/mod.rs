//! Router assembly.

mod books;
mod common;

pub use books::book_routes;
pub use common::common_routes;

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, Request},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use tower_http::trace::TraceLayer;

/// Full application: book CRUD plus operational routes, with body limit and request tracing.
/// The body limit is enforced by the JSON extractor, so oversized bodies get the error envelope.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(book_routes(state))
        .fallback(unknown_route)
        .layer(middleware::from_fn(method_not_allowed))
        .layer(DefaultBodyLimit::max(body_limit_bytes))
        .layer(TraceLayer::new_for_http())
}

async fn unknown_route(req: Request) -> AppError {
    AppError::NotFound(format!("route {}", req.uri().path()))
}

/// Map axum's bare 405 to [`AppError::MethodNotAllowed`].
async fn method_not_allowed(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let resp = next.run(req).await;
    if resp.status() == StatusCode::METHOD_NOT_ALLOWED {
        return AppError::MethodNotAllowed(format!("{} {}", method, path)).into_response();
    }
    resp
}
