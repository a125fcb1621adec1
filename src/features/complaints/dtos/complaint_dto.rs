use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::complaints::models::{
    ActivityType, Complaint, ComplaintActivity, ComplaintStatus, ComplaintType,
};
use crate::shared::multipart::MultipartForm;
use crate::shared::types::SortDirection;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintResponseDto {
    /// Generated id, e.g. `C-7KQ2M9XA`
    pub id: String,
    pub user_id: i64,
    pub category_id: i64,
    pub regency_id: String,
    pub address: String,
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(rename = "type")]
    pub complaint_type: ComplaintType,
    pub date: NaiveDate,
    pub total_likes: i32,
    /// Public paths of attached files
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintResponseDto {
    pub fn new(complaint: Complaint, files: Vec<String>) -> Self {
        Self {
            id: complaint.id,
            user_id: complaint.user_id,
            category_id: complaint.category_id,
            regency_id: complaint.regency_id,
            address: complaint.address,
            description: complaint.description,
            status: complaint.status,
            complaint_type: complaint.complaint_type,
            date: complaint.date,
            total_likes: complaint.total_likes,
            files,
            created_at: complaint.created_at,
            updated_at: complaint.updated_at,
        }
    }
}

/// Complaint fields read from the multipart create form
#[derive(Debug, Clone, Validate)]
pub struct NewComplaint {
    pub category_id: i64,

    #[validate(length(min = 1, max = 10, message = "regency_id is invalid"))]
    pub regency_id: String,

    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    pub complaint_type: ComplaintType,
    pub date: NaiveDate,
}

impl NewComplaint {
    pub fn from_form(form: &MultipartForm) -> Result<Self> {
        let complaint = Self {
            category_id: form.parse("category_id")?,
            regency_id: form.required("regency_id")?.to_string(),
            address: form.required("address")?.to_string(),
            description: form.required("description")?.to_string(),
            complaint_type: form.parse("type")?,
            date: parse_date(form.required("date")?)?,
        };
        complaint.validate()?;
        Ok(complaint)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("date must use the YYYY-MM-DD format".to_string()))
}

/// Owner edits while the complaint is still `Pending`; omitted fields keep their value
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateComplaintDto {
    pub category_id: Option<i64>,

    #[validate(length(min = 1, max = 10, message = "regency_id is invalid"))]
    pub regency_id: Option<String>,

    #[validate(length(min = 1, message = "address must not be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub complaint_type: Option<ComplaintType>,

    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintSortBy {
    #[default]
    CreatedAt,
    TotalLikes,
}

impl ComplaintSortBy {
    pub fn column(&self) -> &'static str {
        match self {
            ComplaintSortBy::CreatedAt => "created_at",
            ComplaintSortBy::TotalLikes => "total_likes",
        }
    }
}

/// Filters for complaint listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ComplaintFilter {
    pub status: Option<ComplaintStatus>,

    #[serde(rename = "type")]
    pub complaint_type: Option<ComplaintType>,

    pub category_id: Option<i64>,

    pub regency_id: Option<String>,

    /// Matches description or address
    pub search: Option<String>,

    /// `created_at` (default) or `total_likes`
    #[serde(default)]
    pub sort_by: ComplaintSortBy,

    /// `desc` (default) or `asc`
    #[serde(default)]
    pub sort: SortDirection,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ActivityQuery {
    /// `like` or `discussion`
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ComplaintActivityDto {
    pub id: i64,
    pub complaint_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub actor_name: Option<String>,
    /// Discussion text for discussion activities
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ComplaintActivity> for ComplaintActivityDto {
    fn from(activity: ComplaintActivity) -> Self {
        Self {
            activity_type: activity.activity_type(),
            id: activity.id,
            complaint_id: activity.complaint_id,
            actor_name: activity.actor_name,
            comment: activity.comment,
            created_at: activity.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn valid_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("category_id", "1"),
            ("regency_id", "1901"),
            ("description", "Jalan berlubang di depan pasar"),
            ("address", "Jl. Merdeka No. 1"),
            ("type", "public"),
            ("date", "2024-01-01"),
        ]
    }

    #[test]
    fn test_new_complaint_from_form() {
        let form = MultipartForm::from_parts(&valid_fields(), vec![]);
        let complaint = NewComplaint::from_form(&form).unwrap();

        assert_eq!(complaint.category_id, 1);
        assert_eq!(complaint.regency_id, "1901");
        assert_eq!(complaint.complaint_type, ComplaintType::Public);
        assert_eq!(complaint.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_new_complaint_requires_every_field() {
        for missing in ["category_id", "regency_id", "description", "address", "type", "date"] {
            let fields: Vec<_> = valid_fields()
                .into_iter()
                .filter(|(name, _)| *name != missing)
                .collect();
            let form = MultipartForm::from_parts(&fields, vec![]);
            assert!(
                matches!(NewComplaint::from_form(&form), Err(AppError::Validation(_))),
                "{} should be required",
                missing
            );
        }
    }

    #[test]
    fn test_new_complaint_rejects_bad_type_and_date() {
        let mut fields = valid_fields();
        fields[4] = ("type", "secret");
        let form = MultipartForm::from_parts(&fields, vec![]);
        assert!(NewComplaint::from_form(&form).is_err());

        let mut fields = valid_fields();
        fields[5] = ("date", "01/01/2024");
        let form = MultipartForm::from_parts(&fields, vec![]);
        assert!(NewComplaint::from_form(&form).is_err());
    }

    #[test]
    fn test_filter_from_query_string() {
        let uri: Uri = "/api/v1/complaints?status=On%20Progress&type=private&sort_by=total_likes&sort=asc"
            .parse()
            .unwrap();
        let Query(filter) = Query::<ComplaintFilter>::try_from_uri(&uri).unwrap();

        assert_eq!(filter.status, Some(ComplaintStatus::OnProgress));
        assert_eq!(filter.complaint_type, Some(ComplaintType::Private));
        assert_eq!(filter.sort_by, ComplaintSortBy::TotalLikes);
        assert_eq!(filter.sort, SortDirection::Asc);
    }

    #[test]
    fn test_filter_defaults_to_newest_first() {
        let uri: Uri = "/api/v1/complaints".parse().unwrap();
        let Query(filter) = Query::<ComplaintFilter>::try_from_uri(&uri).unwrap();

        assert_eq!(filter.sort_by.column(), "created_at");
        assert_eq!(filter.sort.as_sql(), "DESC");
        assert!(filter.status.is_none());
    }
}
