use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "sender_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    User,
    Admin,
}

/// Support room joined with its owner and latest message
#[derive(Debug, Clone, FromRow)]
pub struct Room {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub last_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ROOM_SELECT: &str = r#"
    SELECT r.id, r.user_id, u.name AS user_name,
           (SELECT m.message FROM messages m WHERE m.room_id = r.id
            ORDER BY m.created_at DESC, m.id DESC LIMIT 1) AS last_message,
           r.created_at, r.updated_at
    FROM rooms r
    JOIN users u ON u.id = r.user_id"#;

#[derive(Debug, Clone, FromRow)]
pub struct Message {
    pub id: i64,
    pub room_id: i64,
    pub sender_type: SenderType,
    pub sender_id: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

pub const MESSAGE_COLUMNS: &str = "id, room_id, sender_type, sender_id, message, created_at";
