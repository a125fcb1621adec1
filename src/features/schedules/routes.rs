use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::schedules::handlers;
use crate::features::schedules::services::ScheduleService;

pub fn routes(service: Arc<ScheduleService>) -> Router {
    Router::new()
        .route(
            "/api/v1/complaints/{id}/schedules",
            get(handlers::list_schedules).post(handlers::create_schedule),
        )
        .route(
            "/api/v1/complaints/{id}/schedules/{schedule_id}",
            put(handlers::update_schedule).delete(handlers::delete_schedule),
        )
        .with_state(service)
}
