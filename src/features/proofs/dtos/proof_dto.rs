use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::proofs::models::Proof;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProofResponseDto {
    pub id: i64,
    pub complaint_id: String,
    pub admin_id: i64,
    /// Public path of the stored file
    pub path: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Proof> for ProofResponseDto {
    fn from(p: Proof) -> Self {
        Self {
            id: p.id,
            complaint_id: p.complaint_id,
            admin_id: p.admin_id,
            path: p.path,
            description: p.description,
            created_at: p.created_at,
        }
    }
}
