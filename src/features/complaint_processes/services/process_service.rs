use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaint_processes::dtos::{
    CreateProcessDto, ProcessResponseDto, UpdateProcessDto,
};
use crate::features::complaint_processes::models::{ComplaintProcess, PROCESS_COLUMNS};
use crate::features::complaint_processes::transition::{check_transition, rollback_status};
use crate::features::complaints::services::access::{find_visible, lock_complaint};

/// Service for complaint status processes
pub struct ProcessService {
    pool: PgPool,
}

fn process_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Process {} not found", id))
}

impl ProcessService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        complaint_id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<ProcessResponseDto>> {
        find_visible(&self.pool, complaint_id, caller).await?;

        let processes = sqlx::query_as::<_, ComplaintProcess>(&format!(
            r#"
            SELECT {} FROM complaint_processes
            WHERE complaint_id = $1 AND deleted_at IS NULL
            ORDER BY created_at ASC, id ASC
            "#,
            PROCESS_COLUMNS
        ))
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list complaint processes"))?;

        Ok(processes.into_iter().map(Into::into).collect())
    }

    /// Record a status change. The complaint row stays locked from the status
    /// check until the new status is written.
    pub async fn create(
        &self,
        complaint_id: &str,
        admin_id: i64,
        dto: CreateProcessDto,
    ) -> Result<ProcessResponseDto> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin process transaction"))?;

        let complaint = lock_complaint(&mut *tx, complaint_id).await?;
        check_transition(complaint.status, dto.status)?;

        let process = sqlx::query_as::<_, ComplaintProcess>(&format!(
            r#"
            INSERT INTO complaint_processes (complaint_id, admin_id, status, message)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PROCESS_COLUMNS
        ))
        .bind(complaint_id)
        .bind(admin_id)
        .bind(dto.status)
        .bind(dto.message.trim())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "create complaint process"))?;

        sqlx::query("UPDATE complaints SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(complaint_id)
            .bind(dto.status)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "update complaint status"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit complaint process"))?;

        tracing::info!(
            "Complaint {} moved {} -> {} by admin {}",
            complaint_id,
            complaint.status,
            dto.status,
            admin_id
        );
        Ok(process.into())
    }

    pub async fn update(
        &self,
        complaint_id: &str,
        process_id: i64,
        dto: UpdateProcessDto,
    ) -> Result<ProcessResponseDto> {
        let process = sqlx::query_as::<_, ComplaintProcess>(&format!(
            r#"
            UPDATE complaint_processes
            SET message = $3, updated_at = NOW()
            WHERE id = $1 AND complaint_id = $2 AND deleted_at IS NULL
            RETURNING {}
            "#,
            PROCESS_COLUMNS
        ))
        .bind(process_id)
        .bind(complaint_id)
        .bind(dto.message.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "update complaint process"))?
        .ok_or_else(|| process_not_found(process_id))?;

        Ok(process.into())
    }

    /// Remove the latest process and roll the complaint status back one step
    pub async fn delete(&self, complaint_id: &str, process_id: i64) -> Result<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin process delete"))?;

        lock_complaint(&mut *tx, complaint_id).await?;

        let process = sqlx::query_as::<_, ComplaintProcess>(&format!(
            r#"
            SELECT {} FROM complaint_processes
            WHERE id = $1 AND complaint_id = $2 AND deleted_at IS NULL
            "#,
            PROCESS_COLUMNS
        ))
        .bind(process_id)
        .bind(complaint_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "get complaint process"))?
        .ok_or_else(|| process_not_found(process_id))?;

        let latest_id: i64 = sqlx::query_scalar(
            r#"
            SELECT id FROM complaint_processes
            WHERE complaint_id = $1 AND deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(complaint_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::from_db(e, "get latest complaint process"))?;

        if latest_id != process.id {
            return Err(AppError::BadRequest(
                "Only the latest process can be deleted".to_string(),
            ));
        }

        sqlx::query("UPDATE complaint_processes SET deleted_at = NOW() WHERE id = $1")
            .bind(process.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "delete complaint process"))?;

        let previous = rollback_status(process.status);
        sqlx::query("UPDATE complaints SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(complaint_id)
            .bind(previous)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "roll back complaint status"))?;

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit process delete"))?;

        tracing::info!(
            "Complaint {} rolled back {} -> {}",
            complaint_id,
            process.status,
            previous
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::complaints::models::ComplaintStatus;
    use crate::shared::test_helpers::{insert_test_admin, insert_test_user, seeded_category_id};

    async fn insert_complaint(pool: &PgPool, id: &str) {
        let user_id = insert_test_user(pool, "pelapor_proses").await;
        let category_id = seeded_category_id(pool).await;
        sqlx::query(
            r#"
            INSERT INTO complaints (id, user_id, category_id, regency_id, address, description, type, date)
            VALUES ($1, $2, $3, '1901', 'Jl. Sudirman', 'Drainase tersumbat', 'public', '2024-03-01')
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(category_id)
        .execute(pool)
        .await
        .unwrap();
    }

    async fn stored_status(pool: &PgPool, id: &str) -> ComplaintStatus {
        sqlx::query_scalar("SELECT status FROM complaints WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn step(status: ComplaintStatus) -> CreateProcessDto {
        CreateProcessDto {
            status,
            message: format!("Status menjadi {}", status),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_transition_then_rollback(pool: PgPool) {
        insert_complaint(&pool, "C-PROSES01").await;
        let admin_id = insert_test_admin(&pool, "petugas_proses").await;
        let service = ProcessService::new(pool.clone());

        service
            .create("C-PROSES01", admin_id, step(ComplaintStatus::Verifikasi))
            .await
            .unwrap();
        let latest = service
            .create("C-PROSES01", admin_id, step(ComplaintStatus::OnProgress))
            .await
            .unwrap();
        assert_eq!(
            stored_status(&pool, "C-PROSES01").await,
            ComplaintStatus::OnProgress
        );

        service.delete("C-PROSES01", latest.id).await.unwrap();

        assert_eq!(
            stored_status(&pool, "C-PROSES01").await,
            ComplaintStatus::Verifikasi
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_only_latest_process_can_be_deleted(pool: PgPool) {
        insert_complaint(&pool, "C-PROSES02").await;
        let admin_id = insert_test_admin(&pool, "petugas_urut").await;
        let service = ProcessService::new(pool.clone());

        let first = service
            .create("C-PROSES02", admin_id, step(ComplaintStatus::Verifikasi))
            .await
            .unwrap();
        service
            .create("C-PROSES02", admin_id, step(ComplaintStatus::OnProgress))
            .await
            .unwrap();

        let result = service.delete("C-PROSES02", first.id).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(
            stored_status(&pool, "C-PROSES02").await,
            ComplaintStatus::OnProgress
        );
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_skipping_verification_is_rejected(pool: PgPool) {
        insert_complaint(&pool, "C-PROSES03").await;
        let admin_id = insert_test_admin(&pool, "petugas_lompat").await;
        let service = ProcessService::new(pool.clone());

        let result = service
            .create("C-PROSES03", admin_id, step(ComplaintStatus::Selesai))
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert_eq!(
            stored_status(&pool, "C-PROSES03").await,
            ComplaintStatus::Pending
        );
    }
}
