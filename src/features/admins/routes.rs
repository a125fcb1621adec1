use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::admins::handlers;
use crate::features::admins::services::AdminService;

/// Admin account management (authenticated; super admin except own password)
pub fn routes(service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/api/v1/admins",
            get(handlers::list_admins).post(handlers::create_admin),
        )
        .route("/api/v1/admins/me/password", put(handlers::change_own_password))
        .route(
            "/api/v1/admins/{id}",
            get(handlers::get_admin)
                .put(handlers::update_admin)
                .delete(handlers::delete_admin),
        )
        .with_state(service)
}
