use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::chat::dtos::{MessageResponseDto, RoomResponseDto};
use crate::features::chat::models::{Message, Room, SenderType, MESSAGE_COLUMNS, ROOM_SELECT};
use crate::shared::types::PaginationQuery;

pub fn sender_type(caller: &AuthenticatedUser) -> SenderType {
    if caller.is_admin() {
        SenderType::Admin
    } else {
        SenderType::User
    }
}

/// Any admin may join a room; users only their own
pub fn can_access(room: &Room, caller: &AuthenticatedUser) -> bool {
    caller.is_admin() || (caller.is_user() && room.user_id == caller.id)
}

/// Service for user and admin support rooms
pub struct ChatService {
    pool: PgPool,
}

impl ChatService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: i64) -> Result<Room> {
        sqlx::query_as::<_, Room>(&format!("{} WHERE r.id = $1", ROOM_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "get room"))?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))
    }

    async fn find_accessible(&self, id: i64, caller: &AuthenticatedUser) -> Result<Room> {
        let room = self.find(id).await?;
        if !can_access(&room, caller) {
            return Err(AppError::Forbidden(
                "You are not a participant of this room".to_string(),
            ));
        }
        Ok(room)
    }

    /// Return the user's room, creating it on first use
    pub async fn open_room(&self, user_id: i64) -> Result<RoomResponseDto> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO rooms (user_id) VALUES ($1)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "open room"))?;

        self.find(id).await.map(Into::into)
    }

    pub async fn get_room(&self, id: i64, caller: &AuthenticatedUser) -> Result<RoomResponseDto> {
        self.find_accessible(id, caller).await.map(Into::into)
    }

    /// Rooms with the most recent activity first
    pub async fn list_rooms(
        &self,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<RoomResponseDto>, i64)> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count rooms"))?;

        let rooms = sqlx::query_as::<_, Room>(&format!(
            "{} ORDER BY r.updated_at DESC, r.id DESC LIMIT $1 OFFSET $2",
            ROOM_SELECT
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list rooms"))?;

        Ok((rooms.into_iter().map(Into::into).collect(), total))
    }

    pub async fn list_messages(
        &self,
        room_id: i64,
        caller: &AuthenticatedUser,
        pagination: &PaginationQuery,
    ) -> Result<(Vec<MessageResponseDto>, i64)> {
        self.find_accessible(room_id, caller).await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "count messages"))?;

        let messages = sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {} FROM messages
            WHERE room_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(room_id)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list messages"))?;

        Ok((messages.into_iter().map(Into::into).collect(), total))
    }

    pub async fn send_message(
        &self,
        room_id: i64,
        caller: &AuthenticatedUser,
        message: &str,
    ) -> Result<MessageResponseDto> {
        self.find_accessible(room_id, caller).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin send message"))?;

        let sent = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (room_id, sender_type, sender_id, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        ))
        .bind(room_id)
        .bind(sender_type(caller))
        .bind(caller.id)
        .bind(message.trim())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "send message"))?;

        sqlx::query("UPDATE rooms SET updated_at = NOW() WHERE id = $1")
            .bind(room_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "touch room"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit message"))?;

        Ok(sent.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use chrono::Utc;

    fn room(user_id: i64) -> Room {
        Room {
            id: 1,
            user_id,
            user_name: "Budi".to_string(),
            last_message: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn caller(id: i64, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id,
            username: "caller".to_string(),
            role,
        }
    }

    #[test]
    fn test_room_participants() {
        assert!(can_access(&room(5), &caller(5, Role::User)));
        assert!(can_access(&room(5), &caller(9, Role::Admin)));
        assert!(!can_access(&room(5), &caller(6, Role::User)));
    }

    #[test]
    fn test_sender_type_follows_role() {
        assert_eq!(sender_type(&caller(1, Role::SuperAdmin)), SenderType::Admin);
        assert_eq!(sender_type(&caller(1, Role::User)), SenderType::User);
    }
}
