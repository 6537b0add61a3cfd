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
use crate::features::sliders::dtos::{AdminSliderDto, CreateSliderDto, UpdateSliderDto};
use crate::features::sliders::services::SliderService;
use crate::shared::types::{ApiResponse, ListQuery, Meta};

#[utoipa::path(
    get,
    path = "/api/admin/sliders",
    params(ListQuery),
    responses(
        (status = 200, description = "Sliders retrieved", body = ApiResponse<Vec<AdminSliderDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-sliders",
    security(("bearer_auth" = []))
)]
pub async fn admin_list_sliders(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<AdminSliderDto>>>> {
    let (sliders, total) = service.list(&query).await?;
    let items = sliders.into_iter().map(AdminSliderDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider ID")),
    responses(
        (status = 200, description = "Slider found", body = ApiResponse<AdminSliderDto>),
        (status = 404, description = "Slider not found")
    ),
    tag = "admin-sliders",
    security(("bearer_auth" = []))
)]
pub async fn admin_get_slider(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminSliderDto>>> {
    let slider = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(slider.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/sliders",
    request_body = CreateSliderDto,
    responses(
        (status = 201, description = "Slider created", body = ApiResponse<AdminSliderDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "admin-sliders",
    security(("bearer_auth" = []))
)]
pub async fn create_slider(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    AppJson(dto): AppJson<CreateSliderDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminSliderDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let slider = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(slider.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider ID")),
    request_body = UpdateSliderDto,
    responses(
        (status = 200, description = "Slider updated", body = ApiResponse<AdminSliderDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Slider not found")
    ),
    tag = "admin-sliders",
    security(("bearer_auth" = []))
)]
pub async fn update_slider(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateSliderDto>,
) -> Result<Json<ApiResponse<AdminSliderDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let slider = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(slider.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/sliders/{id}",
    params(("id" = Uuid, Path, description = "Slider ID")),
    responses(
        (status = 200, description = "Slider deleted"),
        (status = 404, description = "Slider not found")
    ),
    tag = "admin-sliders",
    security(("bearer_auth" = []))
)]
pub async fn delete_slider(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<SliderService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
