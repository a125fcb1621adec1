use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;
use crate::shared::multipart::{upload_body_limit, MAX_FILES_PER_REQUEST};

pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route(
            "/api/v1/complaints",
            get(handlers::list_complaints).merge(
                post(handlers::create_complaint).layer(upload_body_limit(MAX_FILES_PER_REQUEST)),
            ),
        )
        .route(
            "/api/v1/complaints/{id}",
            get(handlers::get_complaint)
                .put(handlers::update_complaint)
                .delete(handlers::delete_complaint),
        )
        .route(
            "/api/v1/complaints/{id}/like",
            post(handlers::toggle_complaint_like),
        )
        .route("/api/v1/users/me/complaints", get(handlers::list_my_complaints))
        .route(
            "/api/v1/users/me/complaint-activities",
            get(handlers::list_my_complaint_activities),
        )
        .with_state(service)
}
