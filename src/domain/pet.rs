use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClaimError, PetId};

/// Descriptive attributes of a listing.
///
/// The lifecycle never interprets these; they are opaque strings owned by the
/// pet-management context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetProfile {
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
}

/// Pet aggregate as seen by the booking lifecycle.
///
/// Invariant: `available` is true iff no non-cancelled booking claims this pet.
/// The lifecycle only ever changes `available` (and `updated_at` with it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub pet_id: PetId,
    #[serde(flatten)]
    pub profile: PetProfile,
    pub vaccinated: bool,
    /// Reference to the stored image asset
    pub image: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// New listing, available for adoption.
    pub fn list(
        profile: PetProfile,
        vaccinated: bool,
        image: impl Into<String>,
        listed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            pet_id: PetId::new(),
            profile,
            vaccinated,
            image: image.into(),
            available: true,
            created_at: listed_at,
            updated_at: listed_at,
        }
    }
}

/// Pure function: claim a pet for a booking.
///
/// Fails if another booking already holds the claim.
pub fn claim(pet: &Pet, claimed_at: DateTime<Utc>) -> Result<Pet, ClaimError> {
    if !pet.available {
        return Err(ClaimError::AlreadyClaimed);
    }

    Ok(Pet {
        available: false,
        updated_at: claimed_at,
        ..pet.clone()
    })
}

/// Pure function: release a claim. Releasing an available pet is a no-op.
pub fn release(pet: &Pet, released_at: DateTime<Utc>) -> Pet {
    if pet.available {
        return pet.clone();
    }

    Pet {
        available: true,
        updated_at: released_at,
        ..pet.clone()
    }
}

#[cfg(test)]
pub(crate) fn sample_profile(name: &str) -> PetProfile {
    PetProfile {
        name: name.to_string(),
        species: "Dog".to_string(),
        breed: "Beagle".to_string(),
        age: "2 years".to_string(),
        gender: "Female".to_string(),
        weight: "11 kg".to_string(),
        color: "Tricolor".to_string(),
        location: "Pune".to_string(),
        price: "0".to_string(),
        description: "Friendly and curious".to_string(),
    }
}
