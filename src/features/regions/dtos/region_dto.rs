use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::regions::models::Regency;

/// Query parameters for searching regencies
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct RegionSearchQuery {
    /// Search by name (case-insensitive, partial match)
    #[param(example = "bangka")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegencyResponseDto {
    /// BPS code, e.g. `1901`
    pub id: String,
    pub name: String,
}

impl From<Regency> for RegencyResponseDto {
    fn from(regency: Regency) -> Self {
        Self {
            id: regency.id,
            name: regency.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct SyncRegenciesDto {
    /// Two digit province code, e.g. `19` for Kepulauan Bangka Belitung
    #[validate(length(equal = 2, message = "Province id must be 2 digits"))]
    pub province_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SyncRegenciesResponseDto {
    pub province_id: String,
    pub synced: usize,
}
