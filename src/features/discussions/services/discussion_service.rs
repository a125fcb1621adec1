use std::sync::Arc;

use minijinja::context;
use serde::Serialize;
use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::services::access::{find_complaint, find_visible};
use crate::features::discussions::dtos::{DiscussionRequestDto, DiscussionResponseDto};
use crate::features::discussions::models::{Discussion, DISCUSSION_SELECT};
use crate::modules::chat_completion::{ChatCompletion, ChatMessage};
use crate::shared::templates::{self, DISCUSSION_RECOMMENDATION};

const RECOMMENDATION_REQUEST: &str = "Buatkan usulan balasan untuk pengaduan ini.";

#[derive(Debug, Serialize)]
struct ThreadEntry {
    author: String,
    body: String,
}

/// Service for complaint discussion threads
pub struct DiscussionService {
    pool: PgPool,
    completion: Arc<dyn ChatCompletion>,
    app_name: String,
}

impl DiscussionService {
    pub fn new(pool: PgPool, completion: Arc<dyn ChatCompletion>, app_name: String) -> Self {
        Self {
            pool,
            completion,
            app_name,
        }
    }

    async fn find(&self, complaint_id: &str, id: i64) -> Result<Discussion> {
        sqlx::query_as::<_, Discussion>(&format!(
            "{} AND d.id = $1 AND d.complaint_id = $2",
            DISCUSSION_SELECT
        ))
        .bind(id)
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get discussion"))?
        .ok_or_else(|| AppError::NotFound(format!("Discussion {} not found", id)))
    }

    async fn thread(&self, complaint_id: &str) -> Result<Vec<Discussion>> {
        sqlx::query_as::<_, Discussion>(&format!(
            "{} AND d.complaint_id = $1 ORDER BY d.created_at ASC, d.id ASC",
            DISCUSSION_SELECT
        ))
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list discussions"))
    }

    pub async fn list(
        &self,
        complaint_id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<DiscussionResponseDto>> {
        find_visible(&self.pool, complaint_id, caller).await?;
        let thread = self.thread(complaint_id).await?;
        Ok(thread.into_iter().map(Into::into).collect())
    }

    /// Post to the thread and record the activity for the complaint owner
    pub async fn create(
        &self,
        complaint_id: &str,
        caller: &AuthenticatedUser,
        dto: DiscussionRequestDto,
    ) -> Result<DiscussionResponseDto> {
        find_visible(&self.pool, complaint_id, caller).await?;
        let (user_id, admin_id) = caller.author_ids();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin discussion transaction"))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO discussions (complaint_id, user_id, admin_id, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(complaint_id)
        .bind(user_id)
        .bind(admin_id)
        .bind(dto.comment.trim())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "create discussion"))?;

        sqlx::query(
            "INSERT INTO complaint_activities (complaint_id, discussion_id) VALUES ($1, $2)",
        )
        .bind(complaint_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "record discussion activity"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit discussion"))?;

        self.find(complaint_id, id).await.map(Into::into)
    }

    pub async fn update(
        &self,
        complaint_id: &str,
        id: i64,
        caller: &AuthenticatedUser,
        dto: DiscussionRequestDto,
    ) -> Result<DiscussionResponseDto> {
        let discussion = self.find(complaint_id, id).await?;
        ensure_author(&discussion, caller)?;

        sqlx::query("UPDATE discussions SET comment = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(dto.comment.trim())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "update discussion"))?;

        self.find(complaint_id, id).await.map(Into::into)
    }

    pub async fn delete(
        &self,
        complaint_id: &str,
        id: i64,
        caller: &AuthenticatedUser,
    ) -> Result<()> {
        let discussion = self.find(complaint_id, id).await?;
        ensure_author(&discussion, caller)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin discussion delete"))?;

        sqlx::query("UPDATE discussions SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "delete discussion"))?;

        sqlx::query("DELETE FROM complaint_activities WHERE discussion_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "remove discussion activity"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit discussion delete"))?;

        Ok(())
    }

    /// Ask the chat model for a reply an admin could post to the thread
    pub async fn recommend_reply(&self, complaint_id: &str) -> Result<String> {
        let complaint = find_complaint(&self.pool, complaint_id).await?;

        let category: String = sqlx::query_scalar("SELECT name FROM categories WHERE id = $1")
            .bind(complaint.category_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "get complaint category"))?
            .unwrap_or_default();

        let discussions: Vec<ThreadEntry> = self
            .thread(complaint_id)
            .await?
            .into_iter()
            .map(|d| ThreadEntry {
                author: d.author_name.unwrap_or_else(|| "Anonim".to_string()),
                body: d.comment,
            })
            .collect();

        let prompt = templates::render(
            DISCUSSION_RECOMMENDATION,
            context! {
                app_name => &self.app_name,
                category => category,
                address => complaint.address,
                description => complaint.description,
                discussions => discussions,
            },
        )?;

        let reply = self
            .completion
            .complete(vec![ChatMessage::system(prompt)], RECOMMENDATION_REQUEST)
            .await?;

        Ok(reply)
    }
}

fn ensure_author(discussion: &Discussion, caller: &AuthenticatedUser) -> Result<()> {
    if caller.is_author(discussion.user_id, discussion.admin_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the author can change this discussion".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::model::Role;
    use crate::shared::test_helpers::create_test_user;
    use chrono::Utc;

    fn discussion(user_id: Option<i64>, admin_id: Option<i64>) -> Discussion {
        Discussion {
            id: 1,
            complaint_id: "C-ABCD1234".to_string(),
            user_id,
            admin_id,
            author_name: None,
            comment: "Mohon segera ditindaklanjuti".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_only_author_may_change() {
        let user = create_test_user(Role::User);
        let admin = create_test_user(Role::Admin);

        assert!(ensure_author(&discussion(Some(user.id), None), &user).is_ok());
        assert!(ensure_author(&discussion(None, Some(admin.id)), &admin).is_ok());
        assert!(matches!(
            ensure_author(&discussion(Some(user.id), None), &admin),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_recommendation_prompt_includes_thread() {
        let prompt = templates::render(
            DISCUSSION_RECOMMENDATION,
            context! {
                app_name => "Aduan",
                category => "Infrastruktur",
                address => "Jl. Merdeka",
                description => "Jalan rusak",
                discussions => vec![ThreadEntry {
                    author: "Budi".to_string(),
                    body: "Sudah dua minggu".to_string(),
                }],
            },
        )
        .unwrap();

        assert!(prompt.contains("Infrastruktur"));
        assert!(prompt.contains("Budi: Sudah dua minggu"));
    }
}
