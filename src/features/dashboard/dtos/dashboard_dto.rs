use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::features::complaints::models::ComplaintStatus;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusCountDto {
    pub status: ComplaintStatus,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryCountDto {
    pub category_id: i64,
    pub category_name: String,
    pub count: i64,
}

/// Admin dashboard overview
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardSummaryDto {
    pub total_users: i64,
    pub total_complaints: i64,
    pub total_news: i64,
    /// Every status is present, zero when no complaint has it
    pub complaints_by_status: Vec<StatusCountDto>,
    pub complaints_by_category: Vec<CategoryCountDto>,
}
