use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::districts::dtos::{
    AdminDistrictDto, CreateDistrictDto, DistrictResponseDto, UpdateDistrictDto,
};
use crate::features::districts::services::DistrictService;
use crate::shared::types::{ApiResponse, ListQuery, Meta};

// =============================================================================
// PUBLIC
// =============================================================================

/// Active shipping districts, alphabetically
#[utoipa::path(
    get,
    path = "/api/districts",
    responses(
        (status = 200, description = "List of districts", body = ApiResponse<Vec<DistrictResponseDto>>),
    ),
    tag = "districts"
)]
pub async fn list_districts(
    State(service): State<Arc<DistrictService>>,
) -> Result<Json<ApiResponse<Vec<DistrictResponseDto>>>> {
    let districts = service
        .list_active()
        .await?
        .into_iter()
        .map(DistrictResponseDto::from)
        .collect();
    Ok(Json(ApiResponse::success(Some(districts), None, None)))
}

// =============================================================================
// ADMIN
// =============================================================================

#[utoipa::path(
    get,
    path = "/api/admin/districts",
    params(ListQuery),
    responses(
        (status = 200, description = "Districts retrieved", body = ApiResponse<Vec<AdminDistrictDto>>),
    ),
    tag = "admin-districts",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_districts(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DistrictService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<AdminDistrictDto>>>> {
    let (districts, total) = service.list(&query).await?;
    let items = districts.into_iter().map(AdminDistrictDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    responses(
        (status = 200, description = "District found", body = ApiResponse<AdminDistrictDto>),
        (status = 404, description = "District not found")
    ),
    tag = "admin-districts",
    security(("bearer_auth" = []))
)]
pub async fn admin_get_district(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DistrictService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminDistrictDto>>> {
    let district = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(district.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/districts",
    request_body = CreateDistrictDto,
    responses(
        (status = 201, description = "District created", body = ApiResponse<AdminDistrictDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already in use")
    ),
    tag = "admin-districts",
    security(("bearer_auth" = []))
)]
pub async fn create_district(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DistrictService>>,
    AppJson(dto): AppJson<CreateDistrictDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminDistrictDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(district.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    request_body = UpdateDistrictDto,
    responses(
        (status = 200, description = "District updated", body = ApiResponse<AdminDistrictDto>),
        (status = 404, description = "District not found"),
        (status = 409, description = "Name already in use")
    ),
    tag = "admin-districts",
    security(("bearer_auth" = []))
)]
pub async fn update_district(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DistrictService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateDistrictDto>,
) -> Result<Json<ApiResponse<AdminDistrictDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let district = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(district.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/districts/{id}",
    params(("id" = Uuid, Path, description = "District ID")),
    responses(
        (status = 200, description = "District deleted"),
        (status = 404, description = "District not found"),
        (status = 409, description = "District still has customers")
    ),
    tag = "admin-districts",
    security(("bearer_auth" = []))
)]
pub async fn delete_district(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<DistrictService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
