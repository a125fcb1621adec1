use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::{RequireAdmin, RequireUser};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::chat::dtos::{MessageResponseDto, RoomResponseDto, SendMessageDto};
use crate::features::chat::services::ChatService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Open the caller's support room, or return it if it already exists
#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    responses(
        (status = 200, description = "Caller's room", body = ApiResponse<RoomResponseDto>),
        (status = 403, description = "User access required")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn open_room(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ChatService>>,
) -> Result<Json<ApiResponse<RoomResponseDto>>> {
    let room = service.open_room(user.id).await?;
    Ok(Json(ApiResponse::success(Some(room), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    params(PaginationQuery),
    responses(
        (status = 200, description = "All rooms, most recent first", body = ApiResponse<Vec<RoomResponseDto>>),
        (status = 403, description = "Admin access required")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn list_rooms(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ChatService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<RoomResponseDto>>>> {
    let (rooms, total) = service.list_rooms(&pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(rooms),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}",
    params(("id" = i64, Path, description = "Room ID")),
    responses(
        (status = 200, description = "Room", body = ApiResponse<RoomResponseDto>),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Room not found")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn get_room(
    user: AuthenticatedUser,
    State(service): State<Arc<ChatService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RoomResponseDto>>> {
    let room = service.get_room(id, &user).await?;
    Ok(Json(ApiResponse::success(Some(room), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/{id}/messages",
    params(("id" = i64, Path, description = "Room ID"), PaginationQuery),
    responses(
        (status = 200, description = "Messages, oldest first", body = ApiResponse<Vec<MessageResponseDto>>),
        (status = 403, description = "Not a participant")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn list_messages(
    user: AuthenticatedUser,
    State(service): State<Arc<ChatService>>,
    Path(id): Path<i64>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<MessageResponseDto>>>> {
    let (messages, total) = service.list_messages(id, &user, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(messages),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms/{id}/messages",
    params(("id" = i64, Path, description = "Room ID")),
    request_body = SendMessageDto,
    responses(
        (status = 201, description = "Message sent", body = ApiResponse<MessageResponseDto>),
        (status = 403, description = "Not a participant"),
        (status = 404, description = "Room not found")
    ),
    tag = "chat",
    security(("bearer_auth" = []))
)]
pub async fn send_message(
    user: AuthenticatedUser,
    State(service): State<Arc<ChatService>>,
    Path(id): Path<i64>,
    AppJson(dto): AppJson<SendMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponseDto>>)> {
    dto.validate()?;

    let message = service.send_message(id, &user, &dto.message).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(message), None, None)),
    ))
}
