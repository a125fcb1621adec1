use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::complaint_processes::handlers;
use crate::features::complaint_processes::services::ProcessService;

pub fn routes(service: Arc<ProcessService>) -> Router {
    Router::new()
        .route(
            "/api/v1/complaints/{id}/processes",
            get(handlers::list_processes).post(handlers::create_process),
        )
        .route(
            "/api/v1/complaints/{id}/processes/{process_id}",
            put(handlers::update_process).delete(handlers::delete_process),
        )
        .with_state(service)
}
