use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;
use crate::shared::multipart::upload_body_limit;

/// Routes for citizen profiles and admin user management (authenticated)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/v1/users/me",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/api/v1/users/me/password", put(handlers::change_password))
        .route(
            "/api/v1/users/me/photo",
            post(handlers::upload_photo).layer(upload_body_limit(1)),
        )
        .route("/api/v1/users", get(handlers::list_users))
        .route(
            "/api/v1/users/{id}",
            get(handlers::get_user).delete(handlers::delete_user),
        )
        .with_state(service)
}
