use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Discussion entry joined with its author's display name
#[derive(Debug, Clone, FromRow)]
pub struct Discussion {
    pub id: i64,
    pub complaint_id: String,
    pub user_id: Option<i64>,
    pub admin_id: Option<i64>,
    pub author_name: Option<String>,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const DISCUSSION_SELECT: &str = r#"
    SELECT d.id, d.complaint_id, d.user_id, d.admin_id,
           COALESCE(u.name, a.name) AS author_name,
           d.comment, d.created_at, d.updated_at
    FROM discussions d
    LEFT JOIN users u ON u.id = d.user_id
    LEFT JOIN admins a ON a.id = d.admin_id
    WHERE d.deleted_at IS NULL"#;
