use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn booking_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        // Availability (intake) endpoints - public, no slots means an empty 200
        .route(
            "/professionals/{professional_id}/slots",
            get(handlers::get_available_slots),
        )
        .route(
            "/widget/{professional_id}/horarios",
            get(handlers::get_widget_horarios),
        )
        // Booking commit - authoritative conflict check happens at write time
        .route("/appointments", post(handlers::create_appointment))
        .with_state(state)
}
