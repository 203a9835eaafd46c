use crate::domain::{Pet, PetId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Result of an atomic conditional claim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The flag was flipped from available to unavailable; carries the pet after the flip
    Claimed(Pet),
    /// No pet with this ID
    NotFound,
    /// The pet exists but is already claimed
    Unavailable,
}

/// Pet registry port
///
/// Pet records are owned by the pet-management context. The booking lifecycle
/// reads them and only ever changes the `available` flag.
#[async_trait]
pub trait PetRegistry: Send + Sync {
    /// Find a pet by ID.
    async fn find_by_id(&self, pet_id: PetId) -> Result<Option<Pet>>;

    /// Find several pets at once. Unknown IDs are skipped.
    ///
    /// Used to resolve the pet of every booking in a listing.
    async fn find_by_ids(&self, pet_ids: &[PetId]) -> Result<Vec<Pet>>;

    /// Persist the whole pet record (upsert).
    async fn save(&self, pet: Pet) -> Result<Pet>;

    /// Set `available = false` only if it is currently true, as one atomic step.
    ///
    /// Two concurrent calls for the same pet can never both return `Claimed`.
    async fn claim_if_available(&self, pet_id: PetId) -> Result<ClaimOutcome>;

    /// Set `available = true`. Releasing an unknown or available pet is not an error.
    async fn release(&self, pet_id: PetId) -> Result<()>;
}
