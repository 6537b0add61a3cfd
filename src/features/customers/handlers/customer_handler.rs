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
use crate::features::customers::dtos::{
    CreateCustomerDto, CustomerQuery, CustomerResponseDto, UpdateCustomerDto,
};
use crate::features::customers::services::CustomerService;
use crate::shared::types::{ApiResponse, Meta};

/// List customers (admin)
#[utoipa::path(
    get,
    path = "/api/admin/customers",
    params(CustomerQuery),
    responses(
        (status = 200, description = "Customers retrieved", body = ApiResponse<Vec<CustomerResponseDto>>),
        (status = 403, description = "Forbidden - admin only")
    ),
    tag = "admin-customers",
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CustomerService>>,
    AppQuery(query): AppQuery<CustomerQuery>,
) -> Result<Json<ApiResponse<Vec<CustomerResponseDto>>>> {
    let (customers, total) = service.list(&query).await?;
    let items = customers
        .into_iter()
        .map(CustomerResponseDto::from)
        .collect();
    Ok(Json(ApiResponse::success(
        Some(items),
        None,
        Some(Meta { total }),
    )))
}

#[utoipa::path(
    get,
    path = "/api/admin/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer found", body = ApiResponse<CustomerResponseDto>),
        (status = 404, description = "Customer not found")
    ),
    tag = "admin-customers",
    security(("bearer_auth" = []))
)]
pub async fn get_customer(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CustomerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerResponseDto>>> {
    let customer = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(customer.into()), None, None)))
}

#[utoipa::path(
    post,
    path = "/api/admin/customers",
    request_body = CreateCustomerDto,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerResponseDto>),
        (status = 400, description = "Validation error or unknown district"),
        (status = 409, description = "Email already in use")
    ),
    tag = "admin-customers",
    security(("bearer_auth" = []))
)]
pub async fn create_customer(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CustomerService>>,
    AppJson(dto): AppJson<CreateCustomerDto>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let customer = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(customer.into()), None, None)),
    ))
}

#[utoipa::path(
    put,
    path = "/api/admin/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    request_body = UpdateCustomerDto,
    responses(
        (status = 200, description = "Customer updated", body = ApiResponse<CustomerResponseDto>),
        (status = 400, description = "Validation error or unknown district"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Email already in use")
    ),
    tag = "admin-customers",
    security(("bearer_auth" = []))
)]
pub async fn update_customer(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CustomerService>>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCustomerDto>,
) -> Result<Json<ApiResponse<CustomerResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let customer = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(customer.into()), None, None)))
}

#[utoipa::path(
    delete,
    path = "/api/admin/customers/{id}",
    params(("id" = Uuid, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer deleted"),
        (status = 404, description = "Customer not found")
    ),
    tag = "admin-customers",
    security(("bearer_auth" = []))
)]
pub async fn delete_customer(
    RequireAdmin(_user): RequireAdmin,
    State(service): State<Arc<CustomerService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(None, None, None)))
}
