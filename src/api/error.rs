use crate::application::booking::BookingApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API-layer error
///
/// Wraps application errors and maps them onto HTTP responses.
#[derive(Debug)]
pub struct ApiError(BookingApplicationError);

impl From<BookingApplicationError> for ApiError {
    fn from(err: BookingApplicationError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();

        let (status, code) = match &self.0 {
            // 401 / 403 - caller classification
            BookingApplicationError::AuthenticationRequired => {
                (StatusCode::UNAUTHORIZED, "AUTHENTICATION_REQUIRED")
            }
            BookingApplicationError::AuthorizationDenied => {
                (StatusCode::FORBIDDEN, "AUTHORIZATION_DENIED")
            }

            // 400 - bad input, and an unavailable pet as the booking contract has always reported it
            BookingApplicationError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BookingApplicationError::PetNotAvailable => {
                (StatusCode::BAD_REQUEST, "PET_NOT_AVAILABLE")
            }

            // 404
            BookingApplicationError::PetNotFound => (StatusCode::NOT_FOUND, "PET_NOT_FOUND"),
            BookingApplicationError::BookingNotFound => {
                (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND")
            }
            BookingApplicationError::UserNotFound => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),

            // 409 - state conflicts
            BookingApplicationError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION")
            }
            BookingApplicationError::ConcurrentModification => {
                (StatusCode::CONFLICT, "CONCURRENT_MODIFICATION")
            }

            // 500 - store failures
            // Details go to the log; the client only learns which component failed
            BookingApplicationError::PetRegistryError(e)
            | BookingApplicationError::BookingRepositoryError(e)
            | BookingApplicationError::UserDirectoryError(e)
            | BookingApplicationError::IdentityResolverError(e) => {
                tracing::error!("{}: {}", message, e);
                let body = ErrorResponse::new("SERVER_ERROR", "Server error").with_error(message);
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
            }
        };

        let body = Json(ErrorResponse::new(code, message));
        (status, body).into_response()
    }
}
