mod authorization;
mod booking_service;
mod errors;

pub use authorization::{require_admin, require_authenticated};
pub use booking_service::{
    BookingDetails, ClaimStrategy, LifecyclePolicy, ServiceDependencies, create_booking,
    get_all_bookings, get_user_bookings, get_user_bookings_by_id, update_booking_status,
};
pub use errors::{BookingApplicationError, ErrorKind, Result};
