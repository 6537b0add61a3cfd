use std::sync::Arc;

use axum::{extract::State, Json};

use crate::features::catalog::dtos::CategoryGroupDto;
use crate::features::catalog::services::CatalogAggregator;
use crate::shared::types::{ApiResponse, Meta};

pub const EMPTY_CATALOG_MESSAGE: &str = "no products/categories found";

/// Home page catalog: active categories with their newest products.
///
/// Always answers 200; an empty list means there is nothing to show.
#[utoipa::path(
    get,
    path = "/api/catalog/home",
    responses(
        (status = 200, description = "Grouped catalog", body = ApiResponse<Vec<CategoryGroupDto>>),
    ),
    tag = "catalog"
)]
pub async fn get_home_catalog(
    State(aggregator): State<Arc<CatalogAggregator>>,
) -> Json<ApiResponse<Vec<CategoryGroupDto>>> {
    let groups: Vec<CategoryGroupDto> = aggregator
        .aggregate()
        .await
        .into_iter()
        .map(CategoryGroupDto::from)
        .collect();

    let message = groups
        .is_empty()
        .then(|| EMPTY_CATALOG_MESSAGE.to_string());
    let total = groups.len() as i64;

    Json(ApiResponse::success(
        Some(groups),
        message,
        Some(Meta { total }),
    ))
}
