use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use utoipa::ToSchema;

use crate::core::error::Result;
use crate::features::auth::guards::RequireAdmin;
use crate::features::auth::model::AuthenticatedUser;
use crate::features::proofs::dtos::ProofResponseDto;
use crate::features::proofs::services::ProofService;
use crate::shared::multipart::MultipartForm;
use crate::shared::types::ApiResponse;

/// Proof upload form (documentation only; parsed from multipart)
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ProofUploadForm {
    pub description: Option<String>,
    /// Up to 5 files (jpeg, png, gif, webp or pdf, at most 10MB each)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub files: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/complaints/{id}/proofs",
    params(("id" = String, Path, description = "Complaint ID")),
    responses(
        (status = 200, description = "Uploaded proofs", body = ApiResponse<Vec<ProofResponseDto>>),
        (status = 404, description = "Complaint not found")
    ),
    tag = "proofs",
    security(("bearer_auth" = []))
)]
pub async fn list_proofs(
    user: AuthenticatedUser,
    State(service): State<Arc<ProofService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<ProofResponseDto>>>> {
    let proofs = service.list(&id, &user).await?;
    Ok(Json(ApiResponse::success(Some(proofs), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/v1/complaints/{id}/proofs",
    params(("id" = String, Path, description = "Complaint ID")),
    request_body(content = ProofUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Proofs uploaded", body = ApiResponse<Vec<ProofResponseDto>>),
        (status = 400, description = "Complaint is not On Progress or Selesai"),
        (status = 404, description = "Complaint not found")
    ),
    tag = "proofs",
    security(("bearer_auth" = []))
)]
pub async fn upload_proofs(
    RequireAdmin(admin): RequireAdmin,
    State(service): State<Arc<ProofService>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ProofResponseDto>>>)> {
    let mut form = MultipartForm::read(multipart, "files").await?;
    let description = form.text("description").map(str::to_string);
    let files = form.take_files()?;

    let proofs = service.upload(&id, admin.id, description, files).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(proofs),
            Some("Proof uploaded successfully".to_string()),
            None,
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}/proofs/{proof_id}",
    params(
        ("id" = String, Path, description = "Complaint ID"),
        ("proof_id" = i64, Path, description = "Proof ID")
    ),
    responses(
        (status = 200, description = "Proof deleted"),
        (status = 404, description = "Proof not found")
    ),
    tag = "proofs",
    security(("bearer_auth" = []))
)]
pub async fn delete_proof(
    RequireAdmin(_admin): RequireAdmin,
    State(service): State<Arc<ProofService>>,
    Path((id, proof_id)): Path<(String, i64)>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(&id, proof_id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Proof deleted successfully".to_string()),
        None,
    )))
}
