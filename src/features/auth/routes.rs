use crate::features::auth::handler;
use axum::{routing::get, Router};

/// Auth routes mounted under `/api/admin` (JWT required)
pub fn admin_routes() -> Router {
    Router::new().route("/me", get(handler::get_me))
}
