use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::error::{AppError, Result};
use crate::features::news::models::News;
use crate::shared::multipart::MultipartForm;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewsResponseDto {
    pub id: i64,
    pub admin_id: i64,
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
    pub total_likes: i32,
    pub files: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsResponseDto {
    pub fn new(news: News, files: Vec<String>) -> Self {
        Self {
            id: news.id,
            admin_id: news.admin_id,
            category_id: news.category_id,
            title: news.title,
            content: news.content,
            date: news.date,
            total_likes: news.total_likes,
            files,
            created_at: news.created_at,
            updated_at: news.updated_at,
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("date must use the YYYY-MM-DD format".to_string()))
}

fn check_title(title: &str) -> Result<()> {
    if title.chars().count() > 255 {
        return Err(AppError::Validation(
            "title must be at most 255 characters".to_string(),
        ));
    }
    Ok(())
}

/// Article fields read from the multipart create form
#[derive(Debug, Clone)]
pub struct NewNews {
    pub category_id: i64,
    pub title: String,
    pub content: String,
    pub date: NaiveDate,
}

impl NewNews {
    pub fn from_form(form: &MultipartForm) -> Result<Self> {
        let title = form.required("title")?.to_string();
        check_title(&title)?;

        Ok(Self {
            category_id: form.parse("category_id")?,
            title,
            content: form.required("content")?.to_string(),
            date: parse_date(form.required("date")?)?,
        })
    }
}

/// Article changes read from the multipart update form; absent fields are kept
#[derive(Debug, Clone, Default)]
pub struct NewsChanges {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub date: Option<NaiveDate>,
}

impl NewsChanges {
    pub fn from_form(form: &MultipartForm) -> Result<Self> {
        let title = form.text("title").map(str::to_string);
        if let Some(title) = &title {
            check_title(title)?;
        }

        Ok(Self {
            category_id: form.parse_optional("category_id")?,
            title,
            content: form.text("content").map(str::to_string),
            date: form.text("date").map(parse_date).transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct NewsFilter {
    /// Matches title or content
    pub search: Option<String>,
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_news_from_form() {
        let form = MultipartForm::from_parts(
            &[
                ("category_id", "3"),
                ("title", "Perbaikan jalan selesai"),
                ("content", "Jalan di Koba sudah diaspal ulang."),
                ("date", "2024-02-10"),
            ],
            vec![],
        );
        let news = NewNews::from_form(&form).unwrap();

        assert_eq!(news.category_id, 3);
        assert_eq!(news.date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn test_new_news_rejects_missing_content() {
        let form = MultipartForm::from_parts(
            &[("category_id", "3"), ("title", "Judul"), ("date", "2024-02-10")],
            vec![],
        );
        assert!(matches!(
            NewNews::from_form(&form),
            Err(AppError::Validation(msg)) if msg == "content is required"
        ));
    }

    #[test]
    fn test_changes_keep_absent_fields() {
        let form = MultipartForm::from_parts(&[("title", "Judul baru")], vec![]);
        let changes = NewsChanges::from_form(&form).unwrap();

        assert_eq!(changes.title.as_deref(), Some("Judul baru"));
        assert!(changes.category_id.is_none());
        assert!(changes.date.is_none());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let long = "a".repeat(256);
        let form = MultipartForm::from_parts(&[("title", long.as_str())], vec![]);
        assert!(NewsChanges::from_form(&form).is_err());
    }
}
