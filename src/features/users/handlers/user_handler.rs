use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::dtos::ChangePasswordRequestDto;
use crate::features::auth::guards::{RequireAdmin, RequireUser};
use crate::features::users::dtos::{UpdateProfileDto, UserListQuery, UserResponseDto};
use crate::features::users::services::UserService;
use crate::shared::multipart::MultipartForm;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Profile photo upload form (documentation only; parsed from multipart)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProfilePhotoForm {
    /// jpeg, png, gif or webp, at most 10MB
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/users/me",
    responses(
        (status = 200, description = "Current user profile", body = ApiResponse<UserResponseDto>),
        (status = 403, description = "User access required")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_profile(
    RequireUser(user): RequireUser,
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let profile = service.get(user.id).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me",
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn update_profile(
    RequireUser(user): RequireUser,
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<UpdateProfileDto>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    dto.validate()?;

    let profile = service.update_profile(user.id, dto).await?;
    Ok(Json(ApiResponse::success(
        Some(profile),
        Some("Profile updated successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/me/password",
    request_body = ChangePasswordRequestDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Old password is incorrect")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    RequireUser(user): RequireUser,
    State(service): State<Arc<UserService>>,
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

#[utoipa::path(
    post,
    path = "/api/v1/users/me/photo",
    request_body(content = ProfilePhotoForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo updated", body = ApiResponse<UserResponseDto>),
        (status = 400, description = "Invalid file")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn upload_photo(
    RequireUser(user): RequireUser,
    State(service): State<Arc<UserService>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let mut form = MultipartForm::read(multipart, "photo").await?;
    let file = form.take_single_file()?;

    let profile = service.update_photo(user.id, file).await?;
    Ok(Json(ApiResponse::success(Some(profile), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/users",
    params(UserListQuery, PaginationQuery),
    responses(
        (status = 200, description = "List of users", body = ApiResponse<Vec<UserResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    AppQuery(query): AppQuery<UserListQuery>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<UserResponseDto>>>> {
    let (users, total) = service.list(&query, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(users),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<UserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserResponseDto>>> {
    let user = service.get(id).await?;
    Ok(Json(ApiResponse::success(Some(user), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<UserService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("User deleted successfully".to_string()),
        None,
    )))
}
