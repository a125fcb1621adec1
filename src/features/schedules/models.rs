use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Follow-up visit or meeting planned for a complaint
#[derive(Debug, Clone, FromRow)]
pub struct Schedule {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    pub title: String,
    pub location: String,
    pub scheduled_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const SCHEDULE_COLUMNS: &str =
    "id, complaint_id, admin_id, title, location, scheduled_at, note, created_at, updated_at";
