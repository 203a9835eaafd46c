use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_booking, get_all_bookings, get_user_bookings, get_user_bookings_by_id,
    update_booking_status,
};

/// Creates the API router with all booking endpoints
///
/// - POST /api/bookings - request a booking
/// - GET /api/bookings/user - caller's bookings
/// - GET /api/bookings/admin - all bookings (admin)
/// - GET /api/bookings/user/:userId - a user's bookings (admin)
/// - PUT /api/bookings/:id/status - change status (admin)
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/bookings", post(create_booking))
        .route("/api/bookings/user", get(get_user_bookings))
        .route("/api/bookings/admin", get(get_all_bookings))
        .route("/api/bookings/user/:user_id", get(get_user_bookings_by_id))
        .route("/api/bookings/:id/status", put(update_booking_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
