use std::sync::Arc;

use axum::{routing::get, Router};

use booking_cell::router::booking_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Salon API is running!" }))
        .nest("/booking", booking_routes(state))
}
