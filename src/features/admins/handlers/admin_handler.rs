use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::admins::dtos::{AdminResponseDto, CreateAdminDto, UpdateAdminDto};
use crate::features::admins::services::AdminService;
use crate::features::auth::dtos::ChangePasswordRequestDto;
use crate::features::auth::guards::{RequireAdmin, RequireSuperAdmin};
use crate::shared::types::{ApiResponse, PaginationQuery};

#[utoipa::path(
    get,
    path = "/api/v1/admins",
    params(PaginationQuery),
    responses(
        (status = 200, description = "List of admins", body = ApiResponse<Vec<AdminResponseDto>>),
        (status = 403, description = "Super admin access required")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn list_admins(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<AdminResponseDto>>>> {
    let (admins, total) = service.list(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(admins),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admins",
    request_body = CreateAdminDto,
    responses(
        (status = 201, description = "Admin created", body = ApiResponse<AdminResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already exists")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn create_admin(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<CreateAdminDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminResponseDto>>)> {
    dto.validate()?;

    let admin = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(admin), None, None)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/admins/{id}",
    params(("id" = i64, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin found", body = ApiResponse<AdminResponseDto>),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn get_admin(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<AdminResponseDto>>> {
    let admin = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(admin), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/v1/admins/{id}",
    params(("id" = i64, Path, description = "Admin ID")),
    request_body = UpdateAdminDto,
    responses(
        (status = 200, description = "Admin updated", body = ApiResponse<AdminResponseDto>),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn update_admin(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<UpdateAdminDto>,
) -> Result<Json<ApiResponse<AdminResponseDto>>> {
    dto.validate()?;

    let admin = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(admin), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admins/{id}",
    params(("id" = i64, Path, description = "Admin ID")),
    responses(
        (status = 200, description = "Admin deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "Admin not found")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn delete_admin(
    RequireSuperAdmin(user): RequireSuperAdmin,
    State(service): State<Arc<AdminService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, user.id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Admin deleted successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/v1/admins/me/password",
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Old password is incorrect")
    ),
    tag = "admins",
    security(("bearer_auth" = []))
)]
pub async fn change_own_password(
    RequireAdmin(user): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<ChangePasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.change_password(user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed successfully".to_string()),
        None,
    )))
}
