use crate::domain::{Booking, BookingId, BookingStatus, UserId};
use crate::ports::booking_repository::{BookingRepository as BookingRepositoryTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Mutex;

/// In-memory BookingRepository
///
/// Keeps insertion order so bookings created in the same instant still list
/// newest first.
pub struct BookingRepository {
    bookings: Mutex<Vec<Booking>>,
}

impl BookingRepository {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<Booking>>> {
        Ok(self.bookings.lock().map_err(|_| "booking repository lock poisoned")?)
    }

    fn newest_first<'a>(bookings: impl DoubleEndedIterator<Item = &'a Booking>) -> Vec<Booking> {
        let mut listed: Vec<Booking> = bookings.rev().cloned().collect();
        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listed
    }
}

impl Default for BookingRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingRepositoryTrait for BookingRepository {
    async fn insert(&self, booking: Booking) -> Result<()> {
        let mut bookings = self.lock()?;
        if bookings.iter().any(|b| b.booking_id == booking.booking_id) {
            return Err(format!("duplicate booking id {}", booking.booking_id.value()).into());
        }
        bookings.push(booking);
        Ok(())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<Booking>> {
        Ok(self
            .lock()?
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut bookings = self.lock()?;
        match bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id && b.status == expected)
        {
            Some(booking) => {
                booking.status = status;
                booking.updated_at = updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<Booking>> {
        let bookings = self.lock()?;
        let owned: Vec<&Booking> = bookings.iter().filter(|b| b.user_id == user_id).collect();
        Ok(Self::newest_first(owned.into_iter()))
    }

    async fn find_all(&self) -> Result<Vec<Booking>> {
        Ok(Self::newest_first(self.lock()?.iter()))
    }
}
