use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Like,
    Discussion,
}

/// Activity row joined with the like or discussion that produced it
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintActivity {
    pub id: i64,
    pub complaint_id: String,
    pub like_id: Option<i64>,
    pub discussion_id: Option<i64>,
    /// Name of the user or admin behind the activity
    pub actor_name: Option<String>,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ComplaintActivity {
    pub fn activity_type(&self) -> ActivityType {
        if self.like_id.is_some() {
            ActivityType::Like
        } else {
            ActivityType::Discussion
        }
    }
}
