use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::chat::models::{Message, Room, SenderType};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomResponseDto {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub last_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Room> for RoomResponseDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            user_name: r.user_name,
            last_message: r.last_message,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponseDto {
    pub id: i64,
    pub room_id: i64,
    pub sender_type: SenderType,
    pub sender_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageResponseDto {
    fn from(m: Message) -> Self {
        Self {
            id: m.id,
            room_id: m.room_id,
            sender_type: m.sender_type,
            sender_id: m.sender_id,
            message: m.message,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendMessageDto {
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}
