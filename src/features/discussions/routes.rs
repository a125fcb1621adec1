use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::discussions::handlers;
use crate::features::discussions::services::DiscussionService;

pub fn routes(service: Arc<DiscussionService>) -> Router {
    Router::new()
        .route(
            "/api/v1/complaints/{id}/discussions",
            get(handlers::list_discussions).post(handlers::create_discussion),
        )
        .route(
            "/api/v1/complaints/{id}/discussions/recommendation",
            post(handlers::recommend_reply),
        )
        .route(
            "/api/v1/complaints/{id}/discussions/{discussion_id}",
            put(handlers::update_discussion).delete(handlers::delete_discussion),
        )
        .with_state(service)
}
