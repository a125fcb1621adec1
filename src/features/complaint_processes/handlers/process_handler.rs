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
use crate::features::complaint_processes::dtos::{
    CreateProcessDto, ProcessResponseDto, UpdateProcessDto,
};
use crate::features::complaint_processes::services::ProcessService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}/processes",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Status history, oldest first", body = ApiResponse<Vec<ProcessResponseDto>>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaint-processes",
    security(("bearer_auth" = []))
)]
pub async fn list_processes(
    user: AuthenticatedUser,
    State(service): State<Arc<ProcessService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProcessResponseDto>>>> {
    let processes = service.list(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(processes), None, None)))
}

/// Move the complaint to its next status
#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/processes",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = CreateProcessDto,
    responses(
        (status = 201, description = "Process recorded", body = ApiResponse<ProcessResponseDto>),
        (status = 400, description = "Transition not allowed from the current status"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "complaint-processes",
    security(("bearer_auth" = []))
)]
pub async fn create_process(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ProcessService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<CreateProcessDto>,
) -> Result<(StatusCode, Json<ApiResponse<ProcessResponseDto>>)> {
    dto.validate()?;

    let process = service.create(&id, admin.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(process),
            Some("Complaint status updated successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}/processes/{process_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("process_id" = i64, Path, description = "Process ID")
    ),
    request_body = UpdateProcessDto,
    responses(
        (status = 200, description = "Message updated", body = ApiResponse<ProcessResponseDto>),
        (status = 404, description = "Process not found")
    ),
    tag = "complaint-processes",
    security(("bearer_auth" = []))
)]
pub async fn update_process(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProcessService>>,
    Path((id, process_id)): Path<(String, i64)>,
    AppJson(dto): AppJson<UpdateProcessDto>,
) -> Result<Json<ApiResponse<ProcessResponseDto>>> {
    dto.validate()?;

    let process = service.update(&id, process_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(process), None, None)))
}

/// Delete the latest process, rolling the complaint status back one step
#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}/processes/{process_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("process_id" = i64, Path, description = "Process ID")
    ),
    responses(
        (status = 200, description = "Process deleted"),
        (status = 400, description = "Not the latest process"),
        (status = 404, description = "Process not found")
    ),
    tag = "complaint-processes",
    security(("bearer_auth" = []))
)]
pub async fn delete_process(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProcessService>>,
    Path((id, process_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id, process_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Complaint process deleted successfully".to_string()),
        None,
    )))
}
