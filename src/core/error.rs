use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::error::ErrorKind;
use thiserror::Error;

use crate::shared::types::ApiResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),
}

impl AppError {
    /// Translate a driver error into a domain error using the structured
    /// constraint kind reported by Postgres.
    ///
    /// Unique violations become `Conflict`, foreign key violations become
    /// `NotFound` for the referenced entity, everything else stays a database error.
    pub fn from_db(err: sqlx::Error, context: &str) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.kind() {
                ErrorKind::UniqueViolation => {
                    let field = db.constraint().map(unique_field).unwrap_or("record");
                    return AppError::Conflict(format!("{} already exists", field));
                }
                ErrorKind::ForeignKeyViolation => {
                    let entity = db.constraint().map(referenced_entity).unwrap_or("record");
                    return AppError::NotFound(format!("{} not found", entity));
                }
                ErrorKind::CheckViolation => {
                    return AppError::BadRequest(format!("Invalid data for {}", context));
                }
                _ => {}
            }
        }

        tracing::error!("Failed to {}: {:?}", context, err);
        AppError::Database(err)
    }
}

/// Names the field behind a unique constraint. Multi-column constraints and
/// unknown names report as `record`.
pub fn unique_field(constraint: &str) -> &'static str {
    match constraint {
        "users_email_key" | "admins_email_key" => "email",
        "users_username_key" | "admins_username_key" => "username",
        "categories_name_key" => "name",
        "rooms_user_id_key" => "room",
        "complaint_likes_complaint_id_user_id_key" | "news_likes_news_id_user_id_key" => "like",
        _ => "record",
    }
}

/// Maps a Postgres foreign key name such as `complaints_category_id_fkey`
/// to the entity it points at (`category`).
pub fn referenced_entity(constraint: &str) -> &str {
    let trimmed = constraint
        .strip_suffix("_id_fkey")
        .or_else(|| constraint.strip_suffix("_fkey"))
        .unwrap_or(constraint);

    match trimmed.rsplit_once('_') {
        Some((_, column)) => column,
        None => trimmed,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                    None,
                )
            }
            AppError::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(ref msg) => (
                StatusCode::BAD_REQUEST,
                msg.clone(),
                Some(vec![msg.clone()]),
            ),
            AppError::BadRequest(ref msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
            AppError::Unauthorized(ref msg) => (StatusCode::UNAUTHORIZED, msg.clone(), None),
            AppError::Forbidden(ref msg) => (StatusCode::FORBIDDEN, msg.clone(), None),
            AppError::Conflict(ref msg) => (StatusCode::CONFLICT, msg.clone(), None),
            AppError::ExternalServiceError(ref msg) => {
                tracing::error!("External service error: {}", msg);
                (StatusCode::BAD_GATEWAY, msg.clone(), None)
            }
        };

        let body = Json(ApiResponse::<()>::error(Some(message), errors));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_field_from_index_name() {
        assert_eq!(unique_field("users_email_key"), "email");
        assert_eq!(unique_field("admins_username_key"), "username");
        assert_eq!(unique_field("categories_name_key"), "name");
    }

    #[test]
    fn test_unique_field_for_multi_column_constraints() {
        assert_eq!(
            unique_field("complaint_likes_complaint_id_user_id_key"),
            "like"
        );
        assert_eq!(unique_field("news_likes_news_id_user_id_key"), "like");
        assert_eq!(unique_field("rooms_user_id_key"), "room");
        assert_eq!(unique_field("schedules_complaint_id_title_key"), "record");
    }

    #[test]
    fn test_referenced_entity_from_fkey_name() {
        assert_eq!(referenced_entity("complaints_category_id_fkey"), "category");
        assert_eq!(referenced_entity("complaints_regency_id_fkey"), "regency");
        assert_eq!(referenced_entity("news_admin_id_fkey"), "admin");
        assert_eq!(referenced_entity("complaint_likes_user_id_fkey"), "user");
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED),
            (AppError::Forbidden("x".into()), StatusCode::FORBIDDEN),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                AppError::ExternalServiceError("x".into()),
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_non_database_sqlx_error_stays_database_error() {
        let error = AppError::from_db(sqlx::Error::RowNotFound, "load complaint");
        assert!(matches!(error, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
