//! Outgoing email for one-time passwords

mod mailjet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use mailjet::MailjetClient;

/// Why an OTP was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "otp_purpose", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Register,
    ForgotPassword,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Register => "register",
            OtpPurpose::ForgotPassword => "forgot_password",
        }
    }
}

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Failed to render email: {0}")]
    Template(#[from] crate::shared::templates::TemplateError),

    #[error("Email request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

impl From<EmailError> for crate::core::error::AppError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Template(e) => Self::Internal(e.to_string()),
            other => Self::ExternalServiceError(other.to_string()),
        }
    }
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_otp(&self, address: &str, code: &str, purpose: OtpPurpose)
        -> Result<(), EmailError>;
}
