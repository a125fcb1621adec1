use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::faqs::dtos::{CreateFaqDto, FaqResponseDto, UpdateFaqDto};
use crate::features::faqs::models::{Faq, FAQ_COLUMNS};

pub struct FaqService {
    pool: PgPool,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("FAQ {} not found", id))
}

impl FaqService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<FaqResponseDto>> {
        let faqs = sqlx::query_as::<_, Faq>(&format!(
            "SELECT {} FROM faqs WHERE deleted_at IS NULL ORDER BY id ASC",
            FAQ_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list faqs"))?;

        Ok(faqs.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> Result<FaqResponseDto> {
        sqlx::query_as::<_, Faq>(&format!(
            "SELECT {} FROM faqs WHERE id = $1 AND deleted_at IS NULL",
            FAQ_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get faq"))?
        .map(Into::into)
        .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: CreateFaqDto) -> Result<FaqResponseDto> {
        let faq = sqlx::query_as::<_, Faq>(&format!(
            "INSERT INTO faqs (question, answer) VALUES ($1, $2) RETURNING {}",
            FAQ_COLUMNS
        ))
        .bind(dto.question.trim())
        .bind(dto.answer.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "create faq"))?;

        Ok(faq.into())
    }

    pub async fn update(&self, id: i64, dto: UpdateFaqDto) -> Result<FaqResponseDto> {
        sqlx::query_as::<_, Faq>(&format!(
            r#"
            UPDATE faqs
            SET question = COALESCE($2, question),
                answer = COALESCE($3, answer),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {}
            "#,
            FAQ_COLUMNS
        ))
        .bind(id)
        .bind(dto.question.as_deref().map(str::trim))
        .bind(dto.answer.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update faq"))?
        .map(Into::into)
        .ok_or_else(|| not_found(id))
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result =
            sqlx::query("UPDATE faqs SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::from_db(e, "delete faq"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
