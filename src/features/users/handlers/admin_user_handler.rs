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
use crate::features::users::dtos::{AdminUserResponseDto, CreateAdminUserDto, UpdateAdminUserDto};
use crate::features::users::services::AdminUserService;
use crate::shared::types::{ApiResponse, ListQuery, Meta};

#[utoipa::path(
    get,
    path = "/api/admin/users",
    params(ListQuery),
    responses(
        (status = 200, description = "Users retrieved", body = ApiResponse<Vec<AdminUserResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-users",
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminUserService>>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<AdminUserResponseDto>>>> {
    let (users, total) = service.list(&query).await?;
    let items = users.into_iter().map(AdminUserResponseDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = ApiResponse<AdminUserResponseDto>),
        (status = 404, description = "User not found")
    ),
    tag = "admin-users",
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminUserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<AdminUserResponseDto>>> {
    let user = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateAdminUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<AdminUserResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email or auth subject already in use")
    ),
    tag = "admin-users",
    security(("bearer_auth" = []))
)]
pub async fn create_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminUserService>>,
    AppJson(dto): AppJson<CreateAdminUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<AdminUserResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(user.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateAdminUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<AdminUserResponseDto>),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "admin-users",
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<AdminUserService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateAdminUserDto>,
) -> Result<Json<ApiResponse<AdminUserResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let user = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(user.into()), None, None)))
}

/// Delete a user (admin). Deleting your own account is refused.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Attempt to delete own account"),
        (status = 404, description = "User not found")
    ),
    tag = "admin-users",
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    RequireAdmin(caller): RequireAdmin,
    State(service): State<Arc<AdminUserService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, &caller.sub).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
