use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::districts::handlers;
use crate::features::districts::services::DistrictService;

pub fn routes(service: Arc<DistrictService>) -> Router {
    Router::new()
        .route("/api/districts", get(handlers::list_districts))
        .with_state(service)
}

pub fn admin_routes(service: Arc<DistrictService>) -> Router {
    Router::new()
        .route(
            "/districts",
            get(handlers::admin_list_districts).post(handlers::create_district),
        )
        .route(
            "/districts/{id}",
            get(handlers::admin_get_district)
                .put(handlers::update_district)
                .delete(handlers::delete_district),
        )
        .with_state(service)
}
