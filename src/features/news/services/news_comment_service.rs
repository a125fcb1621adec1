use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::news::dtos::{NewsCommentRequestDto, NewsCommentResponseDto};
use crate::features::news::models::{NewsComment, NEWS_COMMENT_SELECT};

/// Service for comments on news articles
pub struct NewsCommentService {
    pool: PgPool,
}

impl NewsCommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_news(&self, news_id: i64) -> Result<()> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM news WHERE id = $1 AND deleted_at IS NULL)",
        )
        .bind(news_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "check news"))?;

        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("News {} not found", news_id)))
        }
    }

    async fn find(&self, news_id: i64, id: i64) -> Result<NewsComment> {
        sqlx::query_as::<_, NewsComment>(&format!(
            "{} AND c.id = $1 AND c.news_id = $2",
            NEWS_COMMENT_SELECT
        ))
        .bind(id)
        .bind(news_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get news comment"))?
        .ok_or_else(|| AppError::NotFound(format!("Comment {} not found", id)))
    }

    pub async fn list(&self, news_id: i64) -> Result<Vec<NewsCommentResponseDto>> {
        self.ensure_news(news_id).await?;

        let comments = sqlx::query_as::<_, NewsComment>(&format!(
            "{} AND c.news_id = $1 ORDER BY c.created_at ASC, c.id ASC",
            NEWS_COMMENT_SELECT
        ))
        .bind(news_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list news comments"))?;

        Ok(comments.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        news_id: i64,
        caller: &AuthenticatedUser,
        dto: NewsCommentRequestDto,
    ) -> Result<NewsCommentResponseDto> {
        self.ensure_news(news_id).await?;
        let (user_id, admin_id) = caller.author_ids();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO news_comments (news_id, user_id, admin_id, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(news_id)
        .bind(user_id)
        .bind(admin_id)
        .bind(dto.comment.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "create news comment"))?;

        self.find(news_id, id).await.map(Into::into)
    }

    pub async fn update(
        &self,
        news_id: i64,
        id: i64,
        caller: &AuthenticatedUser,
        dto: NewsCommentRequestDto,
    ) -> Result<NewsCommentResponseDto> {
        let comment = self.find(news_id, id).await?;
        ensure_author(&comment, caller)?;

        sqlx::query("UPDATE news_comments SET comment = $2, updated_at = NOW() WHERE id = $1")
            .bind(id)
            .bind(dto.comment.trim())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "update news comment"))?;

        self.find(news_id, id).await.map(Into::into)
    }

    pub async fn delete(&self, news_id: i64, id: i64, caller: &AuthenticatedUser) -> Result<()> {
        let comment = self.find(news_id, id).await?;
        ensure_author(&comment, caller)?;

        sqlx::query("UPDATE news_comments SET deleted_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "delete news comment"))?;

        Ok(())
    }
}

fn ensure_author(comment: &NewsComment, caller: &AuthenticatedUser) -> Result<()> {
    if caller.is_author(comment.user_id, comment.admin_id) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Only the author can change this comment".to_string(),
        ))
    }
}
