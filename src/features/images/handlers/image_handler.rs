use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Redirect,
    Json,
};
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppQuery};
use crate::features::auth::guards::RequireAdmin;
use crate::features::images::dtos::{
    DeleteImageDto, OptimizeImageQuery, UploadImageDto, UploadedImageDto, ALLOWED_IMAGE_TYPES,
    MAX_IMAGE_SIZE,
};
use crate::features::images::services::{ImageOptimizer, ImageService};
use crate::shared::types::ApiResponse;

/// Upload a catalog image (admin)
///
/// Multipart fields:
/// - `file`: the image (required)
/// - `folder`: optional folder slug, defaults to "misc"
#[utoipa::path(
    post,
    path = "/api/admin/images",
    request_body(
        content = UploadImageDto,
        content_type = "multipart/form-data",
    ),
    responses(
        (status = 201, description = "Image uploaded", body = ApiResponse<UploadedImageDto>),
        (status = 400, description = "Missing file, bad type, too large or bad folder"),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-images",
    security(("bearer_auth" = []))
)]
pub async fn upload_image(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ImageService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<UploadedImageDto>>)> {
    let mut file: Option<(Vec<u8>, String)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        match field.name().unwrap_or("") {
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;
                file = Some((data.to_vec(), content_type));
            }
            "folder" => {
                folder = Some(field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read folder field: {}", e))
                })?);
            }
            other => debug!("Ignoring unknown field: {}", other),
        }
    }

    let (data, content_type) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;

    if data.is_empty() {
        return Err(AppError::BadRequest("File is empty".to_string()));
    }
    if data.len() > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} MB",
            MAX_IMAGE_SIZE / 1024 / 1024
        )));
    }
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Image type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }

    let uploaded = service
        .upload(data, &content_type, folder.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(uploaded), None, None)),
    ))
}

/// Delete a catalog image by its public URL (admin)
#[utoipa::path(
    delete,
    path = "/api/admin/images",
    request_body = DeleteImageDto,
    responses(
        (status = 200, description = "Image deleted"),
        (status = 400, description = "URL does not belong to this store")
    ),
    tag = "admin-images",
    security(("bearer_auth" = []))
)]
pub async fn delete_image(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<ImageService>>,
    AppJson(dto): AppJson<DeleteImageDto>,
) -> Result<Json<ApiResponse<()>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    service.delete_by_url(&dto.url).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Image deleted".to_string()),
        None,
    )))
}

/// Redirect to the image optimizer for a resized/re-encoded variant
#[utoipa::path(
    get,
    path = "/api/images/optimize",
    params(OptimizeImageQuery),
    responses(
        (status = 307, description = "Redirect to the optimized image"),
        (status = 400, description = "Invalid url, width, quality or format")
    ),
    tag = "images"
)]
pub async fn optimize_image(
    State(optimizer): State<Arc<ImageOptimizer>>,
    AppQuery(query): AppQuery<OptimizeImageQuery>,
) -> Result<Redirect> {
    let target = optimizer.redirect_url(&query)?;
    Ok(Redirect::temporary(&target))
}
