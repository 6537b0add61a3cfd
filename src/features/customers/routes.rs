use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::customers::handlers;
use crate::features::customers::services::CustomerService;

/// Customer routes, admin only, nested under `/api/admin`
pub fn admin_routes(service: Arc<CustomerService>) -> Router {
    Router::new()
        .route(
            "/customers",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/customers/{id}",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .with_state(service)
}
