use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Completion evidence (`unggah_bukti`) uploaded by an admin
#[derive(Debug, Clone, FromRow)]
pub struct Proof {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    pub path: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const PROOF_COLUMNS: &str = "id, complaint_id, admin_id, path, description, created_at";
