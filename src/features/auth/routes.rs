use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Public auth routes (no authentication required)
pub fn public_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/verify-otp", post(handlers::verify_otp))
        .route("/api/v1/auth/resend-otp", post(handlers::resend_otp))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/admin/login", post(handlers::admin_login))
        .route("/api/v1/auth/forgot-password", post(handlers::forgot_password))
        .route("/api/v1/auth/reset-password", post(handlers::reset_password))
        .with_state(service)
}

/// Protected auth routes (require JWT authentication)
pub fn protected_routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/v1/auth/me", get(handlers::get_me))
        .with_state(service)
}
