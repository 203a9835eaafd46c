use super::{BookingId, PetId};

/// Command: request an adoption booking
///
/// Fields arrive unvalidated from the API; the lifecycle decides what is
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestBooking {
    pub pet_id: Option<PetId>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

/// Command: change a booking's status (admin)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateBookingStatus {
    pub booking_id: BookingId,
    /// Raw status as submitted; parsed by the lifecycle
    pub status: Option<String>,
}

