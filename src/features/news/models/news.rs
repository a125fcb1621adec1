use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct News {
    pub id: i64,
    pub admin_id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub total_likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const NEWS_COLUMNS: &str =
    "id, admin_id, category_id, title, content, date, total_likes, created_at, updated_at";
