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
use crate::features::faqs::dtos::{CreateFaqDto, FaqResponseDto, UpdateFaqDto};
use crate::features::faqs::services::FaqService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    responses(
        (status = 200, description = "List of FAQs", body = ApiResponse<Vec<FaqResponseDto>>),
    ),
    tag = "faqs"
)]
pub async fn list_faqs(
    State(service): State<Arc<FaqService>>,
) -> Result<Json<ApiResponse<Vec<FaqResponseDto>>>> {
    let faqs = service.list().await?;
    Ok(Json(ApiResponse::success(Some(faqs), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/faqs/{id}",
    params(("id" = i64, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "FAQ found", body = ApiResponse<FaqResponseDto>),
        (status = 404, description = "FAQ not found")
    ),
    tag = "faqs"
)]
pub async fn get_faq(
    State(service): State<Arc<FaqService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<FaqResponseDto>>> {
    let faq = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(faq), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/faqs",
    request_body = CreateFaqDto,
    responses(
        (status = 201, description = "FAQ created", body = ApiResponse<FaqResponseDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "faqs",
    security(("bearer_auth" = []))
)]
pub async fn create_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FaqService>>,
    AppJson(dto): AppJson<CreateFaqDto>,
) -> Result<(StatusCode, Json<ApiResponse<FaqResponseDto>>)> {
    dto.validate()?;

    let faq = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(faq), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/faqs/{id}",
    params(("id" = i64, Path, description = "FAQ ID")),
    request_body = UpdateFaqDto,
    responses(
        (status = 200, description = "FAQ updated", body = ApiResponse<FaqResponseDto>),
        (status = 404, description = "FAQ not found")
    ),
    tag = "faqs",
    security(("bearer_auth" = []))
)]
pub async fn update_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FaqService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateFaqDto>,
) -> Result<Json<ApiResponse<FaqResponseDto>>> {
    dto.validate()?;

    let faq = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(faq), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/faqs/{id}",
    params(("id" = i64, Path, description = "FAQ ID")),
    responses(
        (status = 200, description = "FAQ deleted"),
        (status = 404, description = "FAQ not found")
    ),
    tag = "faqs",
    security(("bearer_auth" = []))
)]
pub async fn delete_faq(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<FaqService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("FAQ deleted successfully".to_string()),
        None,
    )))
}
