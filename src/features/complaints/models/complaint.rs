use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;

/// Complaint lifecycle status, stored with its display labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_status")]
pub enum ComplaintStatus {
    Pending,
    Verifikasi,
    #[sqlx(rename = "On Progress")]
    #[serde(rename = "On Progress")]
    OnProgress,
    Selesai,
    Ditolak,
}

impl ComplaintStatus {
    pub const ALL: [ComplaintStatus; 5] = [
        ComplaintStatus::Pending,
        ComplaintStatus::Verifikasi,
        ComplaintStatus::OnProgress,
        ComplaintStatus::Selesai,
        ComplaintStatus::Ditolak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::Verifikasi => "Verifikasi",
            ComplaintStatus::OnProgress => "On Progress",
            ComplaintStatus::Selesai => "Selesai",
            ComplaintStatus::Ditolak => "Ditolak",
        }
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown complaint status '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "complaint_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ComplaintType {
    Public,
    Private,
}

impl std::str::FromStr for ComplaintType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(ComplaintType::Public),
            "private" => Ok(ComplaintType::Private),
            other => Err(format!("Unknown complaint type '{}'", other)),
        }
    }
}

/// Database model for a complaint
#[derive(Debug, Clone, FromRow)]
pub struct Complaint {
    pub id: String,
    pub user_id: i64,
    pub category_id: i64,
    pub regency_id: String,
    pub address: String,
    pub description: String,
    pub status: ComplaintStatus,
    #[sqlx(rename = "type")]
    pub complaint_type: ComplaintType,
    pub date: NaiveDate,
    pub total_likes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Complaint {
    pub fn is_public(&self) -> bool {
        self.complaint_type == ComplaintType::Public
    }
}

pub const COMPLAINT_COLUMNS: &str = "id, user_id, category_id, regency_id, address, description, \
     status, type, date, total_likes, created_at, updated_at";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_parse_back() {
        for status in ComplaintStatus::ALL {
            assert_eq!(status.as_str().parse::<ComplaintStatus>(), Ok(status));
        }
        assert!("on_progress".parse::<ComplaintStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_with_label() {
        let json = serde_json::to_string(&ComplaintStatus::OnProgress).unwrap();
        assert_eq!(json, "\"On Progress\"");
    }

    #[test]
    fn test_complaint_type_parse() {
        assert_eq!("public".parse::<ComplaintType>(), Ok(ComplaintType::Public));
        assert!("secret".parse::<ComplaintType>().is_err());
    }
}
