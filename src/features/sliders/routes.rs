use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::sliders::handlers;
use crate::features::sliders::services::SliderService;

pub fn routes(service: Arc<SliderService>) -> Router {
    Router::new()
        .route("/api/sliders", get(handlers::list_sliders))
        .with_state(service)
}

/// Nested under `/api/admin`
pub fn admin_routes(service: Arc<SliderService>) -> Router {
    Router::new()
        .route(
            "/sliders",
            get(handlers::admin_list_sliders).post(handlers::create_slider),
        )
        .route(
            "/sliders/{id}",
            get(handlers::admin_get_slider)
                .put(handlers::update_slider)
                .delete(handlers::delete_slider),
        )
        .with_state(service)
}
