use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::auth::guards::{RequireAdmin, RequireUser};
use crate::features::news::dtos::{NewNews, NewsChanges, NewsFilter, NewsResponseDto};
use crate::features::news::services::NewsService;
use crate::shared::multipart::MultipartForm;
use crate::shared::types::{ApiResponse, LikeToggleResponseDto, PaginationQuery};

/// News form (documentation only; parsed from multipart). On update every
/// field is optional and uploaded files replace the current ones.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct NewsForm {
    pub category_id: i64,
    pub title: String,
    pub content: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Up to 5 images or PDFs, at most 10MB each
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/news",
    params(NewsFilter, PaginationQuery),
    responses(
        (status = 200, description = "Published news, newest first", body = ApiResponse<Vec<NewsResponseDto>>),
    ),
    tag = "news"
)]
pub async fn list_news(
    State(service): State<Arc<NewsService>>,
    AppQuery(filter): AppQuery<NewsFilter>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<NewsResponseDto>>>> {
    let (news, total) = service.list(&filter, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(news),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "News article", body = ApiResponse<NewsResponseDto>),
        (status = 404, description = "News not found")
    ),
    tag = "news"
)]
pub async fn get_news(
    State(service): State<Arc<NewsService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<NewsResponseDto>>> {
    let news = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(news), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/news",
    request_body(content = NewsForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "News published", body = ApiResponse<NewsResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn create_news(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<NewsService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<NewsResponseDto>>)> {
    let mut form = MultipartForm::read(multipart, "files").await?;
    let news = NewNews::from_form(&form)?;
    let files = form.take_files()?;

    let created = service.create(admin.id, news, files).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("News created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News ID")),
    request_body(content = NewsForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "News updated", body = ApiResponse<NewsResponseDto>),
        (status = 404, description = "News not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn update_news(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NewsService>>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<NewsResponseDto>>> {
    let mut form = MultipartForm::read(multipart, "files").await?;
    let changes = NewsChanges::from_form(&form)?;
    let files = form.take_files()?;

    let news = service.update(id, changes, files).await?;
    Ok(Json(ApiResponse::success(
        Some(news),
        Some("News updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/news/{id}",
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "News deleted"),
        (status = 404, description = "News not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn delete_news(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<NewsService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("News deleted successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/news/{id}/like",
    params(("id" = i64, Path, description = "News ID")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeToggleResponseDto>),
        (status = 404, description = "News not found")
    ),
    tag = "news",
    security(("bearer_auth" = []))
)]
pub async fn toggle_news_like(
    RequireUser(user): RequireUser,
    State(service): State<Arc<NewsService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LikeToggleResponseDto>>> {
    let result = service.toggle_like(id, user.id).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
