use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::complaint_processes::models::ComplaintProcess;
use crate::features::complaints::models::ComplaintStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponseDto {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    pub status: ComplaintStatus,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ComplaintProcess> for ProcessResponseDto {
    fn from(p: ComplaintProcess) -> Self {
        Self {
            id: p.id,
            complaint_id: p.complaint_id,
            admin_id: p.admin_id,
            status: p.status,
            message: p.message,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProcessDto {
    /// Next status: `Verifikasi`, `On Progress`, `Selesai` or `Ditolak`
    pub status: ComplaintStatus,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

/// Only the message of a process can change
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProcessDto {
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_process_parses_status_label() {
        let dto: CreateProcessDto =
            serde_json::from_str(r#"{"status":"On Progress","message":"Tim dikirim"}"#).unwrap();
        assert_eq!(dto.status, ComplaintStatus::OnProgress);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_empty_message_rejected() {
        let dto = CreateProcessDto {
            status: ComplaintStatus::Verifikasi,
            message: String::new(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_unknown_status_rejected() {
        let result =
            serde_json::from_str::<CreateProcessDto>(r#"{"status":"Done","message":"x"}"#);
        assert!(result.is_err());
    }
}
