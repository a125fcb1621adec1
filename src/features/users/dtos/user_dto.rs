use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::users::models::User;
use crate::shared::validation::{TELEPHONE_REGEX, USERNAME_REGEX};

/// Response DTO for a citizen account
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub telephone_number: String,
    pub profile_photo: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponseDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            username: u.username,
            email: u.email,
            telephone_number: u.telephone_number,
            profile_photo: u.profile_photo,
            email_verified: u.email_verified,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

/// Profile fields a citizen may change; omitted fields keep their value
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileDto {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: Option<String>,

    #[validate(
        length(min = 3, max = 50, message = "Username must be 3-50 characters"),
        regex(path = *USERNAME_REGEX, message = "Username may only contain letters, numbers and underscores")
    )]
    pub username: Option<String>,

    #[validate(regex(path = *TELEPHONE_REGEX, message = "Invalid telephone number"))]
    pub telephone_number: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct UserListQuery {
    /// Matches name, username or email
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_profile_allows_partial_updates() {
        let dto: UpdateProfileDto = serde_json::from_str(r#"{"name":"Siti"}"#).unwrap();
        assert!(dto.validate().is_ok());
        assert!(dto.username.is_none());
    }

    #[test]
    fn test_update_profile_rejects_bad_telephone() {
        let dto = UpdateProfileDto {
            name: None,
            username: None,
            telephone_number: Some("12345".to_string()),
        };
        assert!(dto.validate().is_err());
    }
}
