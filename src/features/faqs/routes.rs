use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::faqs::handlers;
use crate::features::faqs::services::FaqService;

pub fn public_routes(service: Arc<FaqService>) -> Router {
    Router::new()
        .route("/api/v1/faqs", get(handlers::list_faqs))
        .route("/api/v1/faqs/{id}", get(handlers::get_faq))
        .with_state(service)
}

pub fn protected_routes(service: Arc<FaqService>) -> Router {
    Router::new()
        .route("/api/v1/faqs", post(handlers::create_faq))
        .route(
            "/api/v1/faqs/{id}",
            put(handlers::update_faq).delete(handlers::delete_faq),
        )
        .with_state(service)
}
