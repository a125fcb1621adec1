use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::features::auth::model::Role;

/// Database model for an administrator account
#[derive(Debug, Clone, FromRow)]
pub struct Admin {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    /// bcrypt hash
    pub password: String,
    pub telephone_number: String,
    pub is_super_admin: bool,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ADMIN_COLUMNS: &str = "id, name, username, email, password, telephone_number, \
     is_super_admin, profile_photo, created_at, updated_at";

impl Admin {
    pub fn role(&self) -> Role {
        Role::for_admin(self.is_super_admin)
    }
}
