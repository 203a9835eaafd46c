use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::booking::BookingDetails;
use crate::domain::{Pet, PetId, commands::RequestBooking};
use crate::ports::UserSummary;

/// Request body of POST /api/bookings
///
/// Every field is optional here so the lifecycle can report exactly which
/// one is missing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub pet_id: Option<Uuid>,
    pub name: Option<String>,
    pub contact: Option<String>,
    pub address: Option<String>,
}

impl CreateBookingRequest {
    pub fn to_command(self) -> RequestBooking {
        RequestBooking {
            pet_id: self.pet_id.map(PetId::from_uuid),
            name: self.name,
            contact: self.contact,
            address: self.address,
        }
    }
}

/// Request body of PUT /api/bookings/:id/status
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// Pet as embedded in booking responses
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub breed: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub color: String,
    pub location: String,
    pub price: String,
    pub description: String,
    pub vaccinated: bool,
    pub image: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.pet_id.value(),
            name: pet.profile.name,
            species: pet.profile.species,
            breed: pet.profile.breed,
            age: pet.profile.age,
            gender: pet.profile.gender,
            weight: pet.profile.weight,
            color: pet.profile.color,
            location: pet.profile.location,
            price: pet.profile.price,
            description: pet.profile.description,
            vaccinated: pet.vaccinated,
            image: pet.image,
            available: pet.available,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        }
    }
}

/// Booking owner as shown in the admin listing
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.user_id.value(),
            name: user.name,
            email: user.email,
            phone: user.phone,
        }
    }
}

/// Booking response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub pet_id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub contact: String,
    pub address: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Resolved pet; null if the record no longer exists
    pub pet: Option<PetResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let booking = details.booking;
        Self {
            id: booking.booking_id.value(),
            pet_id: booking.pet_id.value(),
            user_id: booking.user_id.value(),
            name: booking.contact.name().to_string(),
            contact: booking.contact.contact().to_string(),
            address: booking.contact.address().to_string(),
            status: booking.status.as_str().to_string(),
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            pet: details.pet.map(PetResponse::from),
            user: details.user.map(UserResponse::from),
        }
    }
}

/// Response of POST /api/bookings
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingCreatedResponse {
    pub message: String,
    pub booking: BookingResponse,
    /// Number the adopter can call to follow up
    pub contact_number: String,
}

/// Response of PUT /api/bookings/:id/status
#[derive(Debug, Serialize, Deserialize)]
pub struct BookingStatusUpdatedResponse {
    pub message: String,
    pub booking: BookingResponse,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Failing component, server errors only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
