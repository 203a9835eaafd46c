use crate::domain::{Booking, BookingId, BookingStatus, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Booking repository port
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Store a new booking.
    async fn insert(&self, booking: Booking) -> Result<()>;

    /// Get a booking by ID.
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>>;

    /// Compare-and-set the status.
    ///
    /// The row is updated only while its status still equals `expected`.
    /// Returns `false` when the booking is missing or its status has moved on,
    /// so two admins cannot silently overwrite each other.
    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool>;

    /// All bookings of a user, newest first.
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Booking>>;

    /// All bookings, newest first.
    async fn find_all(&self) -> Result<Vec<Booking>>;
}
