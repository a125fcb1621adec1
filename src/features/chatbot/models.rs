use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// One question and answer exchanged with the chatbot
#[derive(Debug, Clone, FromRow)]
pub struct ChatbotExchange {
    pub id: i64,
    pub user_id: i64,
    pub user_message: String,
    pub bot_response: String,
    pub created_at: DateTime<Utc>,
}

pub const CHATBOT_COLUMNS: &str = "id, user_id, user_message, bot_response, created_at";
