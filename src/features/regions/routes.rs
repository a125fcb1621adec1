use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::regions::handlers;
use crate::features::regions::services::RegionService;

pub fn public_routes(service: Arc<RegionService>) -> Router {
    Router::new()
        .route("/api/v1/regencies", get(handlers::list_regencies))
        .route("/api/v1/regencies/{id}", get(handlers::get_regency))
        .with_state(service)
}

pub fn protected_routes(service: Arc<RegionService>) -> Router {
    Router::new()
        .route("/api/v1/regencies/sync", post(handlers::sync_regencies))
        .with_state(service)
}
