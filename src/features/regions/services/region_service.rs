use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::regions::models::Regency;
use crate::modules::region_api::RegionApiClient;

/// Service for regencies used as complaint locations
pub struct RegionService {
    pool: PgPool,
    api: Arc<RegionApiClient>,
}

impl RegionService {
    pub fn new(pool: PgPool, api: Arc<RegionApiClient>) -> Self {
        Self { pool, api }
    }

    /// List regencies with optional search
    pub async fn list_regencies(&self, search: Option<&str>) -> Result<Vec<Regency>> {
        let regencies = match search.map(str::trim) {
            Some(term) if !term.is_empty() => {
                sqlx::query_as::<_, Regency>(
                    r#"
                    SELECT id, name, created_at, updated_at
                    FROM regencies
                    WHERE name ILIKE $1 OR id LIKE $2
                    ORDER BY id ASC
                    "#,
                )
                .bind(format!("%{}%", term))
                .bind(format!("{}%", term))
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as::<_, Regency>(
                    "SELECT id, name, created_at, updated_at FROM regencies ORDER BY id ASC",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| AppError::from_db(e, "fetch regencies"))?;

        Ok(regencies)
    }

    pub async fn get_regency(&self, id: &str) -> Result<Regency> {
        sqlx::query_as::<_, Regency>(
            "SELECT id, name, created_at, updated_at FROM regencies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "fetch regency"))?
        .ok_or_else(|| AppError::NotFound(format!("Regency '{}' not found", id)))
    }

    /// Upsert every regency of `province_id` from the geography API
    pub async fn sync_province(&self, province_id: &str) -> Result<usize> {
        let remote = self.api.fetch_regencies(province_id).await?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::from_db(e, "begin regency sync"))?;

        for regency in &remote {
            sqlx::query(
                r#"
                INSERT INTO regencies (id, name)
                VALUES ($1, $2)
                ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, updated_at = NOW()
                "#,
            )
            .bind(&regency.id)
            .bind(&regency.name)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::from_db(e, "upsert regency"))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from_db(e, "commit regency sync"))?;

        tracing::info!(
            "Synced {} regencies for province {}",
            remote.len(),
            province_id
        );
        Ok(remote.len())
    }
}
