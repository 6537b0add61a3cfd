use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::catalog::handlers;
use crate::features::catalog::services::CatalogAggregator;

pub fn routes(aggregator: Arc<CatalogAggregator>) -> Router {
    Router::new()
        .route("/api/catalog/home", get(handlers::get_home_catalog))
        .with_state(aggregator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::catalog::handlers::EMPTY_CATALOG_MESSAGE;
    use crate::shared::test_helpers::{category_fixture, product_fixture, FakeCatalogStore};
    use axum_test::TestServer;
    use serde_json::Value;

    fn server(store: FakeCatalogStore) -> TestServer {
        let aggregator = Arc::new(CatalogAggregator::new(Arc::new(store)));
        TestServer::new(routes(aggregator)).unwrap()
    }

    #[tokio::test]
    async fn test_home_returns_grouped_catalog() {
        let shoes = category_fixture("Shoes", true);
        let products = (1..=6).map(|m| product_fixture(&shoes, m)).collect();
        let server = server(FakeCatalogStore::new(vec![shoes.clone()], products));

        let response = server.get("/api/catalog/home").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["data"][0]["category"]["slug"], shoes.slug.as_str());
        assert_eq!(body["data"][0]["products"].as_array().unwrap().len(), 4);
        assert!(body["message"].is_null());
    }

    #[tokio::test]
    async fn test_home_store_failure_is_empty_200() {
        let mut store = FakeCatalogStore::default();
        store.fail_categories = true;

        let response = server(store).get("/api/catalog/home").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"], serde_json::json!([]));
        assert_eq!(body["message"], EMPTY_CATALOG_MESSAGE);
    }
}
