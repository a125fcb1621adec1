use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::discussions::dtos::{
    DiscussionRequestDto, DiscussionResponseDto, RecommendationResponseDto,
};
use crate::features::discussions::services::DiscussionService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}/discussions",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Discussion thread, oldest first", body = ApiResponse<Vec<DiscussionResponseDto>>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "discussions",
    security(("bearer_auth" = []))
)]
pub async fn list_discussions(
    user: AuthenticatedUser,
    State(service): State<Arc<DiscussionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<DiscussionResponseDto>>>> {
    let discussions = service.list(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(discussions), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/discussions",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = DiscussionRequestDto,
    responses(
        (status = 201, description = "Discussion posted", body = ApiResponse<DiscussionResponseDto>),
        (status = 403, description = "Private complaint"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "discussions",
    security(("bearer_auth" = []))
)]
pub async fn create_discussion(
    user: AuthenticatedUser,
    State(service): State<Arc<DiscussionService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<DiscussionRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<DiscussionResponseDto>>)> {
    dto.validate()?;

    let discussion = service.create(&id, &user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(discussion), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}/discussions/{discussion_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("discussion_id" = i64, Path, description = "Discussion ID")
    ),
    request_body = DiscussionRequestDto,
    responses(
        (status = 200, description = "Discussion updated", body = ApiResponse<DiscussionResponseDto>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Discussion not found")
    ),
    tag = "discussions",
    security(("bearer_auth" = []))
)]
pub async fn update_discussion(
    user: AuthenticatedUser,
    State(service): State<Arc<DiscussionService>>,
    Path((id, discussion_id)): Path<(String, i64)>,
    AppJson(dto): AppJson<DiscussionRequestDto>,
) -> Result<Json<ApiResponse<DiscussionResponseDto>>> {
    dto.validate()?;

    let discussion = service.update(&id, discussion_id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(discussion), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}/discussions/{discussion_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("discussion_id" = i64, Path, description = "Discussion ID")
    ),
    responses(
        (status = 200, description = "Discussion deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Discussion not found")
    ),
    tag = "discussions",
    security(("bearer_auth" = []))
)]
pub async fn delete_discussion(
    user: AuthenticatedUser,
    State(service): State<Arc<DiscussionService>>,
    Path((id, discussion_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id, discussion_id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Discussion deleted successfully".to_string()),
        None,
    )))
}

/// Suggest a reply from the complaint and its thread
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/discussions/recommendation",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Suggested reply", body = ApiResponse<RecommendationResponseDto>),
        (status = 404, description = "Complaint not found"),
        (status = 502, description = "Chat completion unavailable")
    ),
    tag = "discussions",
    security(("bearer_auth" = []))
)]
pub async fn recommend_reply(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<DiscussionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RecommendationResponseDto>>> {
    let recommendation = service.recommend_reply(&id).await?;
    Ok(Json(ApiResponse::success(
        Some(RecommendationResponseDto { recommendation }),
        None,
        None,
    )))
}
