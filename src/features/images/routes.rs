use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::features::images::dtos::MAX_IMAGE_SIZE;
use crate::features::images::handlers;
use crate::features::images::services::{ImageOptimizer, ImageService};

pub fn routes(optimizer: Arc<ImageOptimizer>) -> Router {
    Router::new()
        .route("/api/images/optimize", get(handlers::optimize_image))
        .with_state(optimizer)
}

/// Nested under `/api/admin`
pub fn admin_routes(service: Arc<ImageService>) -> Router {
    Router::new()
        .route(
            "/images",
            // room for multipart overhead on top of the file itself
            post(handlers::upload_image)
                .delete(handlers::delete_image)
                .layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 1024 * 1024)),
        )
        .with_state(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{optimizer_fixture, OPTIMIZER_IMAGE_URL as IMAGE_URL};
    use axum::http::{header, StatusCode};
    use axum_test::TestServer;

    fn server() -> TestServer {
        TestServer::new(routes(Arc::new(optimizer_fixture()))).unwrap()
    }

    #[tokio::test]
    async fn test_optimize_redirects_with_307() {
        let response = server()
            .get("/api/images/optimize")
            .add_query_param("url", IMAGE_URL)
            .add_query_param("w", 320)
            .add_query_param("format", "png")
            .await;

        response.assert_status(StatusCode::TEMPORARY_REDIRECT);
        let location = response.header(header::LOCATION);
        let location = location.to_str().unwrap();
        assert!(location.starts_with("https://img.shop.test/?url=https%3A%2F%2Fmedia.shop.test"));
        assert!(location.ends_with("&w=320&q=75&f=png"));
    }

    #[tokio::test]
    async fn test_optimize_rejects_bad_input() {
        let server = server();

        let bad_width = server
            .get("/api/images/optimize")
            .add_query_param("url", IMAGE_URL)
            .add_query_param("w", 333)
            .await;
        bad_width.assert_status_bad_request();

        let bad_format = server
            .get("/api/images/optimize")
            .add_query_param("url", IMAGE_URL)
            .add_query_param("w", 320)
            .add_query_param("format", "bmp")
            .await;
        bad_format.assert_status_bad_request();

        let missing_url = server
            .get("/api/images/optimize")
            .add_query_param("w", 320)
            .await;
        missing_url.assert_status_bad_request();
    }
}
