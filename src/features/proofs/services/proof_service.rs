use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::complaints::models::ComplaintStatus;
use crate::features::complaints::services::access::{find_complaint, find_visible};
use crate::features::proofs::dtos::ProofResponseDto;
use crate::features::proofs::models::{Proof, PROOF_COLUMNS};
use crate::modules::storage::{self, FileStorage, UploadedFile, ALLOWED_MIME_TYPES};

/// Proofs are only accepted once work on the complaint has started
pub fn accepts_proof(status: ComplaintStatus) -> bool {
    matches!(status, ComplaintStatus::OnProgress | ComplaintStatus::Selesai)
}

pub struct ProofService {
    pool: PgPool,
    storage: Arc<dyn FileStorage>,
}

impl ProofService {
    pub fn new(pool: PgPool, storage: Arc<dyn FileStorage>) -> Self {
        Self { pool, storage }
    }

    pub async fn list(
        &self,
        complaint_id: &str,
        caller: &AuthenticatedUser,
    ) -> Result<Vec<ProofResponseDto>> {
        find_visible(&self.pool, complaint_id, caller).await?;

        let proofs = sqlx::query_as::<_, Proof>(&format!(
            "SELECT {} FROM unggah_bukti WHERE complaint_id = $1 ORDER BY created_at ASC, id ASC",
            PROOF_COLUMNS
        ))
        .bind(complaint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "list proofs"))?;

        Ok(proofs.into_iter().map(Into::into).collect())
    }

    /// Store every file and record one proof row per file
    pub async fn upload(
        &self,
        complaint_id: &str,
        admin_id: i64,
        description: Option<String>,
        files: Vec<UploadedFile>,
    ) -> Result<Vec<ProofResponseDto>> {
        if files.is_empty() {
            return Err(AppError::Validation("files is required".to_string()));
        }

        let complaint = find_complaint(&self.pool, complaint_id).await?;
        if !accepts_proof(complaint.status) {
            return Err(AppError::BadRequest(format!(
                "Proof can only be uploaded for complaints that are On Progress or Selesai (current: {})",
                complaint.status
            )));
        }

        let paths =
            storage::store_files(self.storage.as_ref(), "proofs", files, ALLOWED_MIME_TYPES)
                .await?;

        match self.insert(complaint_id, admin_id, description.as_deref(), &paths).await {
            Ok(proofs) => Ok(proofs.into_iter().map(Into::into).collect()),
            Err(e) => {
                storage::remove_files(self.storage.as_ref(), &paths).await;
                Err(e)
            }
        }
    }

    async fn insert(
        &self,
        complaint_id: &str,
        admin_id: i64,
        description: Option<&str>,
        paths: &[String],
    ) -> Result<Vec<Proof>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin proof upload"))?;

        let mut proofs = Vec::with_capacity(paths.len());
        for path in paths {
            let proof = sqlx::query_as::<_, Proof>(&format!(
                r#"
                INSERT INTO unggah_bukti (complaint_id, admin_id, path, description)
                VALUES ($1, $2, $3, $4)
                RETURNING {}
                "#,
                PROOF_COLUMNS
            ))
            .bind(complaint_id)
            .bind(admin_id)
            .bind(path)
            .bind(description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "create proof"))?;
            proofs.push(proof);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit proof upload"))?;

        Ok(proofs)
    }

    pub async fn delete(&self, complaint_id: &str, id: i64) -> Result<()> {
        let path: String = sqlx::query_scalar(
            "DELETE FROM unggah_bukti WHERE id = $1 AND complaint_id = $2 RETURNING path",
        )
        .bind(id)
        .bind(complaint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "delete proof"))?
        .ok_or_else(|| AppError::NotFound(format!("Proof {} not found", id)))?;

        storage::remove_files(self.storage.as_ref(), &[path]).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proof_statuses() {
        assert!(accepts_proof(ComplaintStatus::OnProgress));
        assert!(accepts_proof(ComplaintStatus::Selesai));
        assert!(!accepts_proof(ComplaintStatus::Pending));
        assert!(!accepts_proof(ComplaintStatus::Verifikasi));
        assert!(!accepts_proof(ComplaintStatus::Ditolak));
    }
}
