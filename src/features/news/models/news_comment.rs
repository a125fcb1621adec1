use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Comment joined with its author's display name
#[derive(Debug, Clone, FromRow)]
pub struct NewsComment {
    pub id: i64,
    pub news_id: i64,
    pub user_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const NEWS_COMMENT_SELECT: &str = r#"
    SELECT c.id, c.news_id, c.user_id, c.admin_id,
           COALESCE(u.name, a.name) AS author_name,
           c.comment, c.created_at, c.updated_at
    FROM news_comments c
    LEFT JOIN users u ON u.id = c.user_id
    LEFT JOIN admins a ON a.id = c.admin_id
    WHERE c.deleted_at IS NULL"#;
