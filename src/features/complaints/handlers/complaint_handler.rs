use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireUser;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::dtos::{
    ActivityQuery, ComplaintActivityDto, ComplaintFilter, ComplaintResponseDto, NewComplaint,
    UpdateComplaintDto,
};
use crate::features::complaints::services::ComplaintService;
use crate::shared::multipart::MultipartForm;
use crate::shared::types::{ApiResponse, LikeToggleResponseDto, PaginationQuery};

/// Complaint submission form (documentation only; parsed from multipart)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct CreateComplaintForm {
    pub category_id: i64,
    /// Regency BPS code, e.g. `1901`
    pub regency_id: String,
    pub description: String,
    pub address: String,
    /// `public` or `private`
    #[schema(rename = "type")]
    pub complaint_type: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Up to 5 attachments (jpeg, png, gif, webp or pdf, at most 10MB each)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body(content = CreateComplaintForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Complaint filed", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category or regency not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn create_complaint(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ComplaintService>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ComplaintResponseDto>>)> {
    let mut form = MultipartForm::read(multipart, "files").await?;
    let complaint = NewComplaint::from_form(&form)?;
    let files = form.take_files()?;

    let created = service.create(user.id, complaint, files).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(created),
            Some("Complaint created successfully".to_string()),
            None,
        )),
    ))
}

/// Admins see every complaint; users see public complaints and their own
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    params(ComplaintFilter, PaginationQuery),
    responses(
        (status = 200, description = "List of complaints", body = ApiResponse<Vec<ComplaintResponseDto>>),
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_complaints(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    AppQuery(filter): AppQuery<ComplaintFilter>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let (complaints, total) = service.list(&user, &filter, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint found", body = ApiResponse<ComplaintResponseDto>),
        (status = 403, description = "Private complaint"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn get_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    let complaint = service.get(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(complaint), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = UpdateComplaintDto,
    responses(
        (status = 200, description = "Complaint updated", body = ApiResponse<ComplaintResponseDto>),
        (status = 400, description = "Complaint is no longer Pending"),
        (status = 403, description = "Not the owner")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn update_complaint(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<UpdateComplaintDto>,
) -> Result<Json<ApiResponse<ComplaintResponseDto>>> {
    dto.validate()?;

    let complaint = service.update(&id, user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(complaint),
        Some("Complaint updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Complaint deleted"),
        (status = 400, description = "Complaint is no longer Pending"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn delete_complaint(
    user: AuthenticatedUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id, &user).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Complaint deleted successfully".to_string()),
        None,
    )))
}

/// Toggle the caller's like; returns `liked` or `unliked`
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/like",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Like toggled", body = ApiResponse<LikeToggleResponseDto>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn toggle_complaint_like(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ComplaintService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LikeToggleResponseDto>>> {
    let result = service.toggle_like(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me/complaints",
    params(ComplaintFilter, PaginationQuery),
    responses(
        (status = 200, description = "Complaints filed by the caller", body = ApiResponse<Vec<ComplaintResponseDto>>),
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_my_complaints(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ComplaintService>>,
    AppQuery(filter): AppQuery<ComplaintFilter>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintResponseDto>>>> {
    let (complaints, total) = service.list_own(user.id, &filter, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(complaints),
        None,
        Some(pagination.meta(total)),
    )))
}

/// Likes and discussions on the caller's complaints
#[utoipa::path(
    get,
    path = "/api/v1/users/me/complaint-activities",
    params(ActivityQuery, PaginationQuery),
    responses(
        (status = 200, description = "Activity feed", body = ApiResponse<Vec<ComplaintActivityDto>>),
    ),
    tag = "complaints",
    security(("bearer_auth" = []))
)]
pub async fn list_my_complaint_activities(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ComplaintService>>,
    AppQuery(query): AppQuery<ActivityQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ComplaintActivityDto>>>> {
    let (activities, total) = service
        .list_activities(user.id, &query, &pagination)
        .await?;
    Ok(Json(ApiResponse::success(
        Some(activities),
        None,
        Some(pagination.meta(total)),
    )))
}
