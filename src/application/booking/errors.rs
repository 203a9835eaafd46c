use crate::domain::{BookingStatus, RequestBookingError, TransitionError};
use thiserror::Error;

/// Booking lifecycle application errors
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// No identity on the request
    #[error("Not authenticated")]
    AuthenticationRequired,

    /// Identity present but the role is insufficient
    #[error("Not authorized")]
    AuthorizationDenied,

    /// Missing or invalid input
    #[error("{0}")]
    Validation(String),

    #[error("Pet not found")]
    PetNotFound,

    #[error("Booking not found")]
    BookingNotFound,

    /// The requester is not a known user
    #[error("User not found")]
    UserNotFound,

    /// The pet is claimed by another booking
    #[error("This pet is no longer available")]
    PetNotAvailable,

    /// Rejected by the transition policy
    #[error("Cannot change booking status from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Another update changed the status first
    #[error("Booking status was changed by another request")]
    ConcurrentModification,

    #[error("Pet registry error")]
    PetRegistryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Booking repository error")]
    BookingRepositoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Identity resolver error")]
    IdentityResolverError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification of [`BookingApplicationError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    AuthenticationRequired,
    AuthorizationDenied,
    Validation,
    NotFound,
    Conflict,
    StoreFailure,
}

impl BookingApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingApplicationError::AuthenticationRequired => ErrorKind::AuthenticationRequired,
            BookingApplicationError::AuthorizationDenied => ErrorKind::AuthorizationDenied,
            BookingApplicationError::Validation(_) => ErrorKind::Validation,
            BookingApplicationError::PetNotFound
            | BookingApplicationError::BookingNotFound
            | BookingApplicationError::UserNotFound => ErrorKind::NotFound,
            BookingApplicationError::PetNotAvailable
            | BookingApplicationError::InvalidTransition { .. }
            | BookingApplicationError::ConcurrentModification => ErrorKind::Conflict,
            BookingApplicationError::PetRegistryError(_)
            | BookingApplicationError::BookingRepositoryError(_)
            | BookingApplicationError::UserDirectoryError(_)
            | BookingApplicationError::IdentityResolverError(_) => ErrorKind::StoreFailure,
        }
    }
}

impl From<RequestBookingError> for BookingApplicationError {
    fn from(err: RequestBookingError) -> Self {
        match err {
            RequestBookingError::PetNotAvailable => BookingApplicationError::PetNotAvailable,
            RequestBookingError::MissingContactField(field) => {
                BookingApplicationError::Validation(format!("{} is required", field.as_str()))
            }
        }
    }
}

impl From<TransitionError> for BookingApplicationError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::NotPermitted { from, to } => {
                BookingApplicationError::InvalidTransition { from, to }
            }
        }
    }
}

/// Application-layer Result
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
