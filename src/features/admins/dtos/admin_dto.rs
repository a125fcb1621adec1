use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::admins::models::Admin;
use crate::features::auth::model::Role;
use crate::shared::validation::{TELEPHONE_REGEX, USERNAME_REGEX};

/// Response DTO for an admin account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminResponseDto {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub telephone_number: String,
    pub role: Role,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Admin> for AdminResponseDto {
    fn from(a: Admin) -> Self {
        Self {
            role: a.role(),
            id: a.id,
            name: a.name,
            username: a.username,
            email: a.email,
            telephone_number: a.telephone_number,
            profile_photo: a.profile_photo,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAdminDto {
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, numbers and underscores")
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(regex(path = *TELEPHONE_REGEX, message = "Invalid telephone number"))]
    pub telephone_number: String,

    #[serde(default)]
    pub is_super_admin: bool,
}

/// Omitted fields keep their value
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAdminDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, numbers and underscores")
    )]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    #[validate(regex(path = *TELEPHONE_REGEX, message = "Invalid telephone number"))]
    pub telephone_number: Option<String>,

    pub is_super_admin: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::Fake;

    #[test]
    fn test_create_admin_rejects_short_password() {
        let dto = CreateAdminDto {
            name: "Petugas".to_string(),
            username: "petugas01".to_string(),
            email: SafeEmail().fake(),
            password: "pendek".to_string(),
            telephone_number: "081234567890".to_string(),
            is_super_admin: false,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_create_admin_defaults_to_regular_admin() {
        let dto: CreateAdminDto = serde_json::from_value(serde_json::json!({
            "name": "Petugas",
            "username": "petugas01",
            "email": "petugas@example.com",
            "password": "rahasia123",
            "telephone_number": "081234567890"
        }))
        .unwrap();
        assert!(!dto.is_super_admin);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_update_admin_validates_present_fields_only() {
        assert!(UpdateAdminDto::default().validate().is_ok());

        let dto = UpdateAdminDto {
            password: Some("short".to_string()),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
