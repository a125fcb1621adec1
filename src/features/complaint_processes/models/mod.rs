use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::complaints::models::ComplaintStatus;

/// A status change recorded by an admin
#[derive(Debug, Clone, FromRow)]
pub struct ComplaintProcess {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    pub status: ComplaintStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const PROCESS_COLUMNS: &str =
    "id, complaint_id, admin_id, status, message, created_at, updated_at";
