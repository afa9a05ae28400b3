use axum::{Router, extract::DefaultBodyLimit, http::Uri, routing::get};

use crate::{error::AppError, state::AppState};

pub mod doc;
pub mod health;
pub mod params;
pub mod products;

/// Largest request body a handler will buffer.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Every route of the service, without the outer middleware stack.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health::health_check))
        .merge(products::router())
        .nest("/api", products::legacy_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}

pub async fn home() -> &'static str {
    "Welcome to easyshop server."
}

pub async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "no route");
    AppError::NotFound
}
