use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::admins::models::Admin;
use crate::features::auth::model::Role;
use crate::features::auth::services::AccessToken;
use crate::features::users::models::User;
use crate::modules::email::OtpPurpose;
use crate::shared::validation::{OTP_REGEX, TELEPHONE_REGEX, USERNAME_REGEX};

/// Request DTO for citizen registration
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequestDto {
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
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *OTP_REGEX, message = "OTP must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResendOtpRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Defaults to `register`
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "register")]
    pub purpose: Option<OtpPurpose>,
}

/// Citizen login
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequestDto {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(path = *OTP_REGEX, message = "OTP must be 6 digits"))]
    pub code: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Password change for the signed-in account
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequestDto {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub new_password: String,
}

/// The signed-in account, citizen or admin
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: i64,
    pub role: Role,
    pub name: String,
    pub username: String,
    pub email: String,
    pub telephone_number: String,
    pub profile_photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for AccountDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            role: Role::User,
            name: u.name,
            username: u.username,
            email: u.email,
            telephone_number: u.telephone_number,
            profile_photo: u.profile_photo,
            created_at: u.created_at,
        }
    }
}

impl From<Admin> for AccountDto {
    fn from(a: Admin) -> Self {
        Self {
            id: a.id,
            role: a.role(),
            name: a.name,
            username: a.username,
            email: a.email,
            telephone_number: a.telephone_number,
            profile_photo: a.profile_photo,
            created_at: a.created_at,
        }
    }
}

/// Response DTO for login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
    pub account: AccountDto,
}

impl AuthResponseDto {
    pub fn new(token: AccessToken, account: AccountDto) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            account,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn valid_registration() -> RegisterRequestDto {
        RegisterRequestDto {
            name: Name().fake(),
            username: "warga_bangka".to_string(),
            email: SafeEmail().fake(),
            password: "rahasia123".to_string(),
            telephone_number: "081234567890".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(valid_registration().validate().is_ok());
    }

    #[test]
    fn test_registration_rejects_short_password() {
        let dto = RegisterRequestDto {
            password: "1234567".to_string(),
            ..valid_registration()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_registration_rejects_empty_fields() {
        let dto = RegisterRequestDto {
            name: String::new(),
            username: String::new(),
            email: String::new(),
            password: "rahasia123".to_string(),
            telephone_number: String::new(),
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        for field in ["name", "username", "email", "telephone_number"] {
            assert!(fields.contains_key(field), "{} should be rejected", field);
        }
    }

    #[test]
    fn test_reset_password_rules() {
        let dto = ResetPasswordRequestDto {
            email: SafeEmail().fake(),
            code: "12345".to_string(),
            password: "short".to_string(),
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn test_resend_otp_purpose_is_optional() {
        let dto: ResendOtpRequestDto =
            serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert!(dto.purpose.is_none());

        let dto: ResendOtpRequestDto =
            serde_json::from_str(r#"{"email":"a@example.com","purpose":"forgot_password"}"#)
                .unwrap();
        assert_eq!(dto.purpose, Some(OtpPurpose::ForgotPassword));
    }
}
