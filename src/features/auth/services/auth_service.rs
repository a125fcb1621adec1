use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::admins::models::{Admin, ADMIN_COLUMNS};
use crate::features::auth::dtos::{
    AccountDto, AdminLoginRequestDto, AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto,
    RegisterRequestDto, ResendOtpRequestDto, ResetPasswordRequestDto, VerifyOtpRequestDto,
};
use crate::features::auth::model::{AuthenticatedUser, Role};
use crate::features::auth::password::{hash_password, verify_password};
use crate::features::auth::services::{OtpService, TokenService};
use crate::features::users::models::{User, USER_COLUMNS};
use crate::modules::email::OtpPurpose;

/// Registration, OTP verification, login and password reset
pub struct AuthService {
    pool: PgPool,
    tokens: Arc<TokenService>,
    otp: Arc<OtpService>,
}

impl AuthService {
    pub fn new(pool: PgPool, tokens: Arc<TokenService>, otp: Arc<OtpService>) -> Self {
        Self { pool, tokens, otp }
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1 AND deleted_at IS NULL",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "find user by email"))
    }

    /// Create an unverified account and email a registration OTP
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AccountDto> {
        let password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (name, username, email, password, telephone_number)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(dto.name.trim())
        .bind(&dto.username)
        .bind(&dto.email)
        .bind(password)
        .bind(&dto.telephone_number)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "register user"))?;

        tracing::info!("Registered user {} ({})", user.id, user.username);

        self.otp.issue(&user.email, OtpPurpose::Register).await?;

        Ok(user.into())
    }

    pub async fn verify_otp(&self, dto: VerifyOtpRequestDto) -> Result<AccountDto> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin verification"))?;

        self.otp
            .consume(&mut tx, &dto.email, &dto.code, OtpPurpose::Register)
            .await?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET email_verified = TRUE, updated_at = NOW()
            WHERE email = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&dto.email)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "verify user email"))?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit verification"))?;

        Ok(user.into())
    }

    pub async fn resend_otp(&self, dto: ResendOtpRequestDto) -> Result<()> {
        let purpose = dto.purpose.unwrap_or(OtpPurpose::Register);
        let user = self
            .find_user_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if purpose == OtpPurpose::Register && user.email_verified {
            return Err(AppError::BadRequest(
                "Email has already been verified".to_string(),
            ));
        }

        self.otp.issue(&user.email, purpose).await
    }

    pub async fn login(&self, dto: LoginRequestDto) -> Result<AuthResponseDto> {
        let user = self
            .find_user_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid email or password".to_string()))?;

        if !verify_password(&dto.password, &user.password)? {
            return Err(AppError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        if !user.email_verified {
            return Err(AppError::Forbidden(
                "Email has not been verified".to_string(),
            ));
        }

        let token = self.tokens.issue(user.id, Role::User, &user.username)?;
        Ok(AuthResponseDto::new(token, user.into()))
    }

    pub async fn admin_login(&self, dto: AdminLoginRequestDto) -> Result<AuthResponseDto> {
        let admin = sqlx::query_as::<_, Admin>(&format!(
            "SELECT {} FROM admins WHERE username = $1 AND deleted_at IS NULL",
            ADMIN_COLUMNS
        ))
        .bind(&dto.username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "find admin by username"))?
        .ok_or_else(|| AppError::Unauthorized("Invalid username or password".to_string()))?;

        if !verify_password(&dto.password, &admin.password)? {
            return Err(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ));
        }

        let token = self.tokens.issue(admin.id, admin.role(), &admin.username)?;
        Ok(AuthResponseDto::new(token, admin.into()))
    }

    pub async fn forgot_password(&self, dto: ForgotPasswordRequestDto) -> Result<()> {
        let user = self
            .find_user_by_email(&dto.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        self.otp.issue(&user.email, OtpPurpose::ForgotPassword).await
    }

    pub async fn reset_password(&self, dto: ResetPasswordRequestDto) -> Result<()> {
        let password = hash_password(&dto.password)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin password reset"))?;

        self.otp
            .consume(&mut tx, &dto.email, &dto.code, OtpPurpose::ForgotPassword)
            .await?;

        let updated = sqlx::query(
            "UPDATE users SET password = $1, updated_at = NOW() WHERE email = $2 AND deleted_at IS NULL",
        )
        .bind(password)
        .bind(&dto.email)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "reset password"))?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit password reset"))?;

        Ok(())
    }

    /// Current account details for the token holder
    pub async fn me(&self, user: &AuthenticatedUser) -> Result<AccountDto> {
        let account = if user.is_admin() {
            sqlx::query_as::<_, Admin>(&format!(
                "SELECT {} FROM admins WHERE id = $1 AND deleted_at IS NULL",
                ADMIN_COLUMNS
            ))
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "load admin"))?
            .map(AccountDto::from)
        } else {
            sqlx::query_as::<_, User>(&format!(
                "SELECT {} FROM users WHERE id = $1 AND deleted_at IS NULL",
                USER_COLUMNS
            ))
            .bind(user.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_db(e, "load user"))?
            .map(AccountDto::from)
        };

        account.ok_or_else(|| AppError::NotFound("Account not found".to_string()))
    }
}
