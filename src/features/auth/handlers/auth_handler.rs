use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    AccountDto, AdminLoginRequestDto, AuthResponseDto, ForgotPasswordRequestDto, LoginRequestDto,
    RegisterRequestDto, ResendOtpRequestDto, ResetPasswordRequestDto, VerifyOtpRequestDto,
};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

/// Register a new citizen account
///
/// The account stays unverified until the OTP sent to the email is confirmed.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered, OTP sent", body = ApiResponse<AccountDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or username already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<AccountDto>>)> {
    dto.validate()?;

    let account = service.register(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(account),
            Some("Registration successful, check your email for the OTP code".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/verify-otp",
    request_body = VerifyOtpRequestDto,
    responses(
        (status = 200, description = "Email verified", body = ApiResponse<AccountDto>),
        (status = 400, description = "Invalid or expired OTP")
    ),
    tag = "auth"
)]
pub async fn verify_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<VerifyOtpRequestDto>,
) -> Result<Json<ApiResponse<AccountDto>>> {
    dto.validate()?;

    let account = service.verify_otp(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(account),
        Some("Email verified successfully".to_string()),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-otp",
    request_body = ResendOtpRequestDto,
    responses(
        (status = 200, description = "OTP sent"),
        (status = 400, description = "Email already verified"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn resend_otp(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResendOtpRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.resend_otp(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("OTP code sent".to_string()),
        None,
    )))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Email not verified")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()?;

    let auth_response = service.login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

/// Login as admin with username and password
#[utoipa::path(
    post,
    path = "/api/v1/auth/admin/login",
    request_body = AdminLoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponseDto>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn admin_login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<AdminLoginRequestDto>,
) -> Result<Json<ApiResponse<AuthResponseDto>>> {
    dto.validate()?;

    let auth_response = service.admin_login(dto).await?;
    Ok(Json(ApiResponse::success(Some(auth_response), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = ForgotPasswordRequestDto,
    responses(
        (status = 200, description = "Reset code sent"),
        (status = 404, description = "User not found")
    ),
    tag = "auth"
)]
pub async fn forgot_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ForgotPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.forgot_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password reset code sent".to_string()),
        None,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordRequestDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Invalid or expired OTP")
    ),
    tag = "auth"
)]
pub async fn reset_password(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ResetPasswordRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()?;

    service.reset_password(dto).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Password changed successfully".to_string()),
        None,
    )))
}

/// Get the authenticated account
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Current account", body = ApiResponse<AccountDto>),
        (status = 401, description = "Unauthorized")
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_me(
    user: AuthenticatedUser,
    State(service): State<Arc<AuthService>>,
) -> Result<Json<ApiResponse<AccountDto>>> {
    let account = service.me(&user).await?;
    Ok(Json(ApiResponse::success(Some(account), None, None)))
}
