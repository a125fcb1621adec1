use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireSuperAdmin;
use crate::features::regions::dtos::{
    RegencyResponseDto, RegionSearchQuery, SyncRegenciesDto, SyncRegenciesResponseDto,
};
use crate::features::regions::services::RegionService;
use crate::shared::types::ApiResponse;

#[utoipa::path(
    get,
    path = "/api/v1/regencies",
    params(RegionSearchQuery),
    responses(
        (status = 200, description = "List of regencies", body = ApiResponse<Vec<RegencyResponseDto>>),
    ),
    tag = "regions"
)]
pub async fn list_regencies(
    State(service): State<Arc<RegionService>>,
    AppQuery(query): AppQuery<RegionSearchQuery>,
) -> Result<Json<ApiResponse<Vec<RegencyResponseDto>>>> {
    let regencies = service.list_regencies(query.search.as_deref()).await?;
    let dtos: Vec<RegencyResponseDto> = regencies.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(Some(dtos), None, None)))
}

#[utoipa::path(
    get,
    path = "/api/v1/regencies/{id}",
    params(("id" = String, Path, description = "Regency BPS code")),
    responses(
        (status = 200, description = "Regency details", body = ApiResponse<RegencyResponseDto>),
        (status = 404, description = "Regency not found")
    ),
    tag = "regions"
)]
pub async fn get_regency(
    State(service): State<Arc<RegionService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RegencyResponseDto>>> {
    let regency = service.get_regency(&id).await?;
    Ok(Json(ApiResponse::success(Some(regency.into()), None, None)))
}

/// Pull a province's regencies from the geography API
#[utoipa::path(
    post,
    path = "/api/v1/regencies/sync",
    request_body = SyncRegenciesDto,
    responses(
        (status = 200, description = "Regencies synced", body = ApiResponse<SyncRegenciesResponseDto>),
        (status = 403, description = "Super admin access required"),
        (status = 404, description = "Province not found"),
        (status = 502, description = "Geography API unavailable")
    ),
    tag = "regions",
    security(("bearer_auth" = []))
)]
pub async fn sync_regencies(
    RequireSuperAdmin(_user): RequireSuperAdmin,
    State(service): State<Arc<RegionService>>,
    AppJson(dto): AppJson<SyncRegenciesDto>,
) -> Result<Json<ApiResponse<SyncRegenciesResponseDto>>> {
    dto.validate()?;

    let synced = service.sync_province(&dto.province_id).await?;
    Ok(Json(ApiResponse::success(
        Some(SyncRegenciesResponseDto {
            province_id: dto.province_id,
            synced,
        }),
        None,
        None,
    )))
}
