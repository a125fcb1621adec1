use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for a registered citizen
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub telephone_number: String,
    pub profile_photo: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const USER_COLUMNS: &str = "id, name, username, email, password, telephone_number, \
     profile_photo, email_verified, created_at, updated_at";
