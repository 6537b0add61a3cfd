use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppQuery;
use crate::features::search::dto::{SearchQuery, SearchResultDto};
use crate::features::search::service::SearchService;
use crate::shared::types::ApiResponse;

/// Search visible products and categories
#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Search results", body = ApiResponse<SearchResultDto>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "search"
)]
pub async fn search(
    State(service): State<Arc<SearchService>>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Json<ApiResponse<SearchResultDto>>> {
    let result = service.search(&query).await?;
    Ok(Json(ApiResponse::success(Some(result), None, None)))
}
