use super::{BookingStatus, ContactField};

/// Claim error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// The pet is already held by a non-cancelled booking
    AlreadyClaimed,
}

/// Booking request error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBookingError {
    /// The pet is no longer available
    PetNotAvailable,
    /// A contact snapshot field is blank
    MissingContactField(ContactField),
}

impl From<ClaimError> for RequestBookingError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::AlreadyClaimed => RequestBookingError::PetNotAvailable,
        }
    }
}

impl From<ContactField> for RequestBookingError {
    fn from(field: ContactField) -> Self {
        RequestBookingError::MissingContactField(field)
    }
}

/// Status transition error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The active transition policy does not allow `from -> to`
    NotPermitted {
        from: BookingStatus,
        to: BookingStatus,
    },
}
