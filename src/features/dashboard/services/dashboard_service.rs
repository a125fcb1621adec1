use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::complaints::models::ComplaintStatus;
use crate::features::dashboard::dtos::*;

/// Fill in statuses missing from a `GROUP BY status` result with zero
pub fn status_breakdown(rows: &[(ComplaintStatus, i64)]) -> Vec<StatusCountDto> {
    ComplaintStatus::ALL
        .iter()
        .map(|status| StatusCountDto {
            status: *status,
            count: rows
                .iter()
                .find(|(s, _)| s == status)
                .map(|(_, count)| *count)
                .unwrap_or(0),
        })
        .collect()
}

/// Service for admin dashboard queries
pub struct DashboardService {
    pool: PgPool,
}

impl DashboardService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummaryDto> {
        let (total_users, total_complaints, total_news): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE deleted_at IS NULL),
                (SELECT COUNT(*) FROM complaints WHERE deleted_at IS NULL),
                (SELECT COUNT(*) FROM news WHERE deleted_at IS NULL)
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "get dashboard totals"))?;

        let by_status: Vec<(ComplaintStatus, i64)> = sqlx::query_as(
            r#"
            SELECT status, COUNT(*)
            FROM complaints
            WHERE deleted_at IS NULL
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "count complaints by status"))?;

        let complaints_by_category = sqlx::query_as::<_, CategoryCountDto>(
            r#"
            SELECT c.id AS category_id, c.name AS category_name, COUNT(p.id) AS count
            FROM categories c
            LEFT JOIN complaints p ON p.category_id = c.id AND p.deleted_at IS NULL
            WHERE c.deleted_at IS NULL
            GROUP BY c.id, c.name
            ORDER BY count DESC, c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::from_db(e, "count complaints by category"))?;

        Ok(DashboardSummaryDto {
            total_users,
            total_complaints,
            total_news,
            complaints_by_status: status_breakdown(&by_status),
            complaints_by_category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_breakdown_zero_fills() {
        let rows = vec![
            (ComplaintStatus::Selesai, 4),
            (ComplaintStatus::Pending, 2),
        ];

        let breakdown = status_breakdown(&rows);

        assert_eq!(breakdown.len(), ComplaintStatus::ALL.len());
        assert_eq!(breakdown[0].status, ComplaintStatus::Pending);
        assert_eq!(breakdown[0].count, 2);
        assert_eq!(breakdown[1].count, 0);
        assert_eq!(breakdown[3].status, ComplaintStatus::Selesai);
        assert_eq!(breakdown[3].count, 4);
    }
}
