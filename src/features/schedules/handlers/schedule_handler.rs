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
use crate::features::schedules::dtos::{
    CreateScheduleDto, ScheduleResponseDto, UpdateScheduleDto,
};
use crate::features::schedules::services::ScheduleService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}/schedules",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Upcoming and past schedules", body = ApiResponse<Vec<ScheduleResponseDto>>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "schedules",
    security(("bearer_auth" = []))
)]
pub async fn list_schedules(
    user: AuthenticatedUser,
    State(service): State<Arc<ScheduleService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ScheduleResponseDto>>>> {
    let schedules = service.list(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(schedules), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/schedules",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body = CreateScheduleDto,
    responses(
        (status = 201, description = "Schedule created", body = ApiResponse<ScheduleResponseDto>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "schedules",
    security(("bearer_auth" = []))
)]
pub async fn create_schedule(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ScheduleService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<CreateScheduleDto>,
) -> Result<(StatusCode, Json<ApiResponse<ScheduleResponseDto>>)> {
    dto.validate()?;

    let schedule = service.create(&id, admin.id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(schedule),
            Some("Schedule created successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/complaints/{id}/schedules/{schedule_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("schedule_id" = i64, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleDto,
    responses(
        (status = 200, description = "Schedule updated", body = ApiResponse<ScheduleResponseDto>),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules",
    security(("bearer_auth" = []))
)]
pub async fn update_schedule(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ScheduleService>>,
    Path((id, schedule_id)): Path<(String, i64)>,
    AppJson(dto): AppJson<UpdateScheduleDto>,
) -> Result<Json<ApiResponse<ScheduleResponseDto>>> {
    dto.validate()?;

    let schedule = service.update(&id, schedule_id, dto).await?;
    Ok(Json(ApiResponse::success(Some(schedule), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}/schedules/{schedule_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("schedule_id" = i64, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted"),
        (status = 404, description = "Schedule not found")
    ),
    tag = "schedules",
    security(("bearer_auth" = []))
)]
pub async fn delete_schedule(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ScheduleService>>,
    Path((id, schedule_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id, schedule_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Schedule deleted successfully".to_string()),
        None,
    )))
}
