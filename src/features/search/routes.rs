use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::search::handler;
use crate::features::search::service::SearchService;

pub fn routes(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/api/search", get(handler::search))
        .with_state(service)
}
