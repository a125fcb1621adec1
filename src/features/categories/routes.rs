use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Read-only category routes (no authentication required)
pub fn public_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/v1/categories", get(handlers::list_categories))
        .route("/api/v1/categories/{id}", get(handlers::get_category))
        .with_state(service)
}

/// Category management (admin)
pub fn protected_routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route("/api/v1/categories", post(handlers::create_category))
        .route(
            "/api/v1/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .with_state(service)
}
