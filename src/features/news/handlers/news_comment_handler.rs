use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::news::dtos::{NewsCommentRequestDto, NewsCommentResponseDto};
use crate::features::news::services::NewsCommentService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/news/{id}/comments",
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "Comments, oldest first", body = ApiResponse<Vec<NewsCommentResponseDto>>),
        (status = 404, description = "News not found")
    ),
    tag = "news"
)]
pub async fn list_news_comments(
    State(service): State<Arc<NewsCommentService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<NewsCommentResponseDto>>>> {
    let comments = service.list(id).await?;
    Ok(Json(ApiResponse::success(Some(comments), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/news/{id}/comments",
    params(("id" = i64, Path, description = "News ID")),
    request_body = NewsCommentRequestDto,
    responses(
        (status = 201, description = "Comment posted", body = ApiResponse<NewsCommentResponseDto>),
        (status = 404, description = "News not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn create_news_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<NewsCommentService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<NewsCommentRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<NewsCommentResponseDto>>)> {
    dto.validate()?;

    let comment = service.create(id, &user, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/news/{id}/comments/{comment_id}",
    params(
        ("id" = i64, Path, description = "News ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    request_body = NewsCommentRequestDto,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<NewsCommentResponseDto>),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn update_news_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<NewsCommentService>>,
    Path((id, comment_id)): Path<(i64, i64)>,
    AppJson(dto): AppJson<NewsCommentRequestDto>,
) -> Result<Json<ApiResponse<NewsCommentResponseDto>>> {
    dto.validate()?;

    let comment = service.update(id, comment_id, &user, dto).await?;
    Ok(Json(ApiResponse::success(Some(comment), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/news/{id}/comments/{comment_id}",
    params(
        ("id" = i64, Path, description = "News ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Not the author"),
        (status = 404, description = "Comment not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn delete_news_comment(
    user: AuthenticatedUser,
    State(service): State<Arc<NewsCommentService>>,
    Path((id, comment_id)): Path<(i64, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, comment_id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Comment deleted successfully".to_string()),
        None,
    )))
}
