use std::sync::Arc;

use axum::{extract::State, Json};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireUser;
use crate::features::chatbot::dtos::{ChatbotRequestDto, ChatbotResponseDto};
use crate::features::chatbot::services::ChatbotService;
use crate::shared::types::{ApiResponse, PaginationQuery};

/// Ask the chatbot; the answer draws on the FAQ list and recent history
#[utoipa::path(
    post,
    path = "/api/v1/chatbot",
    request_body = ChatbotRequestDto,
    responses(
        (status = 200, description = "Chatbot reply", body = ApiResponse<ChatbotResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Chat completion unavailable")
    ),
    tag = "chatbot",
    security(("bearer_auth" = []))
)]
pub async fn send_message(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ChatbotService>>,
    AppJson(dto): AppJson<ChatbotRequestDto>,
) -> Result<Json<ApiResponse<ChatbotResponseDto>>> {
    dto.validate()?;

    let reply = service.send(user.id, &dto.message).await?;
    Ok(Json(ApiResponse::success(Some(reply), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/chatbot/history",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Past exchanges, oldest first", body = ApiResponse<Vec<ChatbotResponseDto>>),
    ),
    tag = "chatbot",
    security(("bearer_auth" = []))
)]
pub async fn get_history(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ChatbotService>>,
    AppQuery(pagination): AppQuery<PaginationQuery>,
) -> Result<Json<ApiResponse<Vec<ChatbotResponseDto>>>> {
    let (history, total) = service.history(user.id, &pagination).await?;
    Ok(Json(ApiResponse::success(
        Some(history),
        None,
        Some(pagination.meta(total)),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/v1/chatbot/history",
    responses(
        (status = 200, description = "History cleared"),
    ),
    tag = "chatbot",
    security(("bearer_auth" = []))
)]
pub async fn clear_history(
    RequireUser(user): RequireUser,
    State(service): State<Arc<ChatbotService>>,
) -> Result<Json<ApiResponse<()>>> {
    let removed = service.clear_history(user.id).await?;
    tracing::debug!("Cleared {} chatbot exchanges for user {}", removed, user.id);
    Ok(Json(ApiResponse::success(
        None,
        Some("Chatbot history cleared".to_string()),
        None,
    )))
}
