use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::features::sliders::dtos::{SliderListResponseDto, SliderResponseDto};
use crate::features::sliders::services::SliderService;
use crate::shared::types::ApiResponse;

/// Active hero slides with the initial carousel state
#[utoipa::path(
    get,
    path = "/api/sliders",
    responses(
        (status = 200, description = "Slides and carousel state", body = ApiResponse<SliderListResponseDto>),
    ),
    tag = "sliders"
)]
pub async fn list_sliders(
    State(service): State<Arc<SliderService>>,
) -> Result<Json<ApiResponse<SliderListResponseDto>>> {
    let slides = service
        .list_active()
        .await?
        .into_iter()
        .map(SliderResponseDto::from)
        .collect();

    let body = SliderListResponseDto::new(slides, service.autoplay_interval());
    Ok(Json(ApiResponse::success(Some(body), None, None)))
}
