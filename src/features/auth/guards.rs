//! Role-based authorization guards.
//!
//! Each guard reads the [`AuthenticatedUser`] placed in the request by the
//! auth middleware and rejects callers without the required role:
//! - `RequireSuperAdmin`: super_admin only
//! - `RequireAdmin`: admin or super_admin
//! - `RequireUser`: registered users (citizens)

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

fn authenticated(parts: &Parts) -> Result<AuthenticatedUser, AppError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))
}

/// # Example
/// ```ignore
/// pub async fn handler(RequireSuperAdmin(admin): RequireSuperAdmin) { ... }
/// ```
pub struct RequireSuperAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super admin access required".to_string(),
            ));
        }

        Ok(RequireSuperAdmin(user))
    }
}

pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user))
    }
}

pub struct RequireUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = authenticated(parts)?;

        if !user.is_user() {
            return Err(AppError::Forbidden("User access required".to_string()));
        }

        Ok(RequireUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::{create_test_user, with_auth};
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    fn router() -> Router {
        Router::new()
            .route("/super", get(|RequireSuperAdmin(_): RequireSuperAdmin| async { "ok" }))
            .route("/admin", get(|RequireAdmin(_): RequireAdmin| async { "ok" }))
            .route("/user", get(|RequireUser(_): RequireUser| async { "ok" }))
    }

    #[tokio::test]
    async fn test_missing_user_is_unauthorized() {
        let server = TestServer::new(router()).unwrap();
        server
            .get("/admin")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_guards() {
        let server = TestServer::new(with_auth(router(), create_test_user(Role::Admin))).unwrap();

        server.get("/admin").await.assert_status_ok();
        server
            .get("/super")
            .await
            .assert_status(StatusCode::FORBIDDEN);
        server
            .get("/user")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_super_admin_passes_admin_guard() {
        let server =
            TestServer::new(with_auth(router(), create_test_user(Role::SuperAdmin))).unwrap();

        server.get("/super").await.assert_status_ok();
        server.get("/admin").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_user_guard() {
        let server = TestServer::new(with_auth(router(), create_test_user(Role::User))).unwrap();

        server.get("/user").await.assert_status_ok();
        server
            .get("/admin")
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
