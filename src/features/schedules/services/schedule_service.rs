use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::services::access::{find_complaint, find_visible};
use crate::features::schedules::dtos::{
    CreateScheduleDto, ScheduleResponseDto, UpdateScheduleDto,
};
use crate::features::schedules::models::{Schedule, SCHEDULE_COLUMNS};

pub struct ScheduleService {
    pool: PgPool,
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Schedule {} not found", id))
}

impl ScheduleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        complaint_id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<ScheduleResponseDto>> {
        find_visible(&self.pool, complaint_id, caller).await?;

        let schedules = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            SELECT {} FROM schedules
            WHERE complaint_id = $1 AND deleted_at IS NULL
            ORDER BY scheduled_at ASC
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list schedules"))?;

        Ok(schedules.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        complaint_id: &str,
        admin_id: i64,
        dto: CreateScheduleDto,
    ) -> Result<ScheduleResponseDto> {
        find_complaint(&self.pool, complaint_id).await?;

        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            INSERT INTO schedules (complaint_id, admin_id, title, location, scheduled_at, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(complaint_id)
        .bind(admin_id)
        .bind(dto.title.trim())
        .bind(dto.location.trim())
        .bind(dto.scheduled_at)
        .bind(dto.note.as_deref().map(str::trim))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "create schedule"))?;

        Ok(schedule.into())
    }

    pub async fn update(
        &self,
        complaint_id: &str,
        id: i64,
        dto: UpdateScheduleDto,
    ) -> Result<ScheduleResponseDto> {
        let schedule = sqlx::query_as::<_, Schedule>(&format!(
            r#"
            UPDATE schedules
            SET title = COALESCE($3, title),
                location = COALESCE($4, location),
                scheduled_at = COALESCE($5, scheduled_at),
                note = COALESCE($6, note),
                updated_at = NOW()
            WHERE id = $1 AND complaint_id = $2 AND deleted_at IS NULL
            RETURNING {}
            "#,
            SCHEDULE_COLUMNS
        ))
        .bind(id)
        .bind(complaint_id)
        .bind(dto.title.as_deref().map(str::trim))
        .bind(dto.location.as_deref().map(str::trim))
        .bind(dto.scheduled_at)
        .bind(dto.note.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update schedule"))?
        .ok_or_else(|| not_found(id))?;

        Ok(schedule.into())
    }

    pub async fn delete(&self, complaint_id: &str, id: i64) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE schedules SET deleted_at = NOW()
            WHERE id = $1 AND complaint_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(complaint_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "delete schedule"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}
