use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::discussions::models::Discussion;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DiscussionResponseDto {
    pub id: i64,
    pub complaint_id: String,
    /// Set when a citizen wrote the entry
    pub user_id: Option<i64>,
    /// Set when an admin wrote the entry
    pub admin_id: Option<i64>,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Discussion> for DiscussionResponseDto {
    fn from(d: Discussion) -> Self {
        Self {
            id: d.id,
            complaint_id: d.complaint_id,
            user_id: d.user_id,
            admin_id: d.admin_id,
            author_name: d.author_name,
            comment: d.comment,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct DiscussionRequestDto {
    #[validate(length(min = 1, max = 5000, message = "Comment must be 1-5000 characters"))]
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecommendationResponseDto {
    pub recommendation: String,
}
