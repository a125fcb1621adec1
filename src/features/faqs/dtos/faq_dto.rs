use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::faqs::models::Faq;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FaqResponseDto {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Faq> for FaqResponseDto {
    fn from(f: Faq) -> Self {
        Self {
            id: f.id,
            question: f.question,
            answer: f.answer,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateFaqDto {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,

    #[validate(length(min = 1, message = "Answer is required"))]
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFaqDto {
    #[validate(length(min = 1, message = "Question must not be empty"))]
    pub question: Option<String>,

    #[validate(length(min = 1, message = "Answer must not be empty"))]
    pub answer: Option<String>,
}
