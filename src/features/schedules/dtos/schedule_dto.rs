use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::schedules::models::Schedule;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponseDto {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    pub title: String,
    pub location: String,
    pub scheduled_at: DateTime<Utc>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Schedule> for ScheduleResponseDto {
    fn from(s: Schedule) -> Self {
        Self {
            id: s.id,
            complaint_id: s.complaint_id,
            admin_id: s.admin_id,
            title: s.title,
            location: s.location,
            scheduled_at: s.scheduled_at,
            note: s.note,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateScheduleDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    /// RFC 3339 timestamp, e.g. `2024-05-01T09:00:00+07:00`
    pub scheduled_at: DateTime<Utc>,

    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateScheduleDto {
    #[validate(length(min = 1, max = 255, message = "Title must be 1-255 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Location must not be empty"))]
    pub location: Option<String>,

    pub scheduled_at: Option<DateTime<Utc>>,

    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_accepts_offset_timestamps() {
        let dto: CreateScheduleDto = serde_json::from_str(
            r#"{"title":"Survei lokasi","location":"Pangkalpinang","scheduled_at":"2024-05-01T09:00:00+07:00"}"#,
        )
        .unwrap();

        assert!(dto.validate().is_ok());
        assert_eq!(dto.scheduled_at.to_rfc3339(), "2024-05-01T02:00:00+00:00");
        assert!(dto.note.is_none());
    }

    #[test]
    fn test_blank_title_rejected() {
        let dto = CreateScheduleDto {
            title: String::new(),
            location: "Sungailiat".to_string(),
            scheduled_at: Utc::now(),
            note: None,
        };
        assert!(dto.validate().is_err());
    }
}
