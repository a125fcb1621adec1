use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::chatbot::models::ChatbotExchange;

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChatbotRequestDto {
    #[validate(length(min = 1, max = 2000, message = "Message must be 1-2000 characters"))]
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChatbotResponseDto {
    pub id: i64,
    pub user_message: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatbotExchange> for ChatbotResponseDto {
    fn from(e: ChatbotExchange) -> Self {
        Self {
            id: e.id,
            user_message: e.user_message,
            bot_response: e.bot_response,
            created_at: e.created_at,
        }
    }
}
