use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Regency or city (kabupaten/kota), keyed by its BPS code
#[derive(Debug, Clone, FromRow)]
pub struct Regency {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
