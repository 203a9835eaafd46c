use crate::application::booking::{
    BookingDetails, ServiceDependencies, create_booking as execute_create_booking,
    get_all_bookings as query_all_bookings, get_user_bookings as query_user_bookings,
    get_user_bookings_by_id as query_user_bookings_by_id, require_admin,
    require_authenticated, update_booking_status as execute_update_booking_status,
};
use crate::domain::{BookingId, UserId, commands::UpdateBookingStatus};
use crate::ports::IdentityResolver;
use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    error::ApiError,
    extract::{CurrentCaller, ValidJson, ValidPath},
    types::{
        BookingCreatedResponse, BookingResponse, BookingStatusUpdatedResponse,
        CreateBookingRequest, UpdateStatusRequest,
    },
};

// ============================================================================
// State
// ============================================================================

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
    pub identity_resolver: Arc<dyn IdentityResolver>,
    /// Returned with every new booking
    pub contact_number: String,
}

// ============================================================================
// Command handlers
// ============================================================================

/// POST /api/bookings - request an adoption booking
///
/// The pet is claimed and the booking starts as pending.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    CurrentCaller(caller): CurrentCaller,
    body: Result<ValidJson<CreateBookingRequest>, ApiError>,
) -> Result<(StatusCode, Json<BookingCreatedResponse>), ApiError> {
    require_authenticated(&caller)?;
    let ValidJson(req) = body?;

    let details = execute_create_booking(&state.service_deps, &caller, req.to_command()).await?;

    let response = BookingCreatedResponse {
        message: "Booking created successfully".to_string(),
        booking: BookingResponse::from(details),
        contact_number: state.contact_number.clone(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/bookings/:id/status - change a booking's status (admin)
pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    CurrentCaller(caller): CurrentCaller,
    path: Result<ValidPath<Uuid>, ApiError>,
    body: Result<ValidJson<UpdateStatusRequest>, ApiError>,
) -> Result<Json<BookingStatusUpdatedResponse>, ApiError> {
    require_admin(&caller)?;
    let ValidPath(booking_id) = path?;
    let ValidJson(req) = body?;

    let cmd = UpdateBookingStatus {
        booking_id: BookingId::from_uuid(booking_id),
        status: req.status,
    };

    let details = execute_update_booking_status(&state.service_deps, &caller, cmd).await?;

    Ok(Json(BookingStatusUpdatedResponse {
        message: "Booking status updated".to_string(),
        booking: BookingResponse::from(details),
    }))
}

// ============================================================================
// Query handlers
// ============================================================================

/// GET /api/bookings/user - the caller's own bookings
pub async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let details = query_user_bookings(&state.service_deps, &caller).await?;
    Ok(to_responses(details))
}

/// GET /api/bookings/admin - every booking with its user (admin)
pub async fn get_all_bookings(
    State(state): State<Arc<AppState>>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let details = query_all_bookings(&state.service_deps, &caller).await?;
    Ok(to_responses(details))
}

/// GET /api/bookings/user/:userId - another user's bookings (admin)
pub async fn get_user_bookings_by_id(
    State(state): State<Arc<AppState>>,
    CurrentCaller(caller): CurrentCaller,
    path: Result<ValidPath<Uuid>, ApiError>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    require_admin(&caller)?;
    let ValidPath(user_id) = path?;

    let details =
        query_user_bookings_by_id(&state.service_deps, &caller, UserId::from_uuid(user_id))
            .await?;
    Ok(to_responses(details))
}

fn to_responses(details: Vec<BookingDetails>) -> Json<Vec<BookingResponse>> {
    Json(details.into_iter().map(BookingResponse::from).collect())
}
