use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::news::models::NewsComment;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsCommentResponseDto {
    pub id: i64,
    pub news_id: i64,
    pub user_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewsComment> for NewsCommentResponseDto {
    fn from(c: NewsComment) -> Self {
        Self {
            id: c.id,
            news_id: c.news_id,
            user_id: c.user_id,
            admin_id: c.admin_id,
            author_name: c.author_name,
            comment: c.comment,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct NewsCommentRequestDto {
    #[validate(length(min = 1, max = 2000, message = "Comment must be 1-2000 characters"))]
    pub comment: String,
}
