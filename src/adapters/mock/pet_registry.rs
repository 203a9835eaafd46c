use crate::domain::{self, Pet, PetId};
use crate::ports::pet_registry::{ClaimOutcome, PetRegistry as PetRegistryTrait, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory PetRegistry
///
/// Every operation runs under one lock, so `claim_if_available` is atomic
/// like the conditional UPDATE of the Postgres adapter.
pub struct PetRegistry {
    pets: Mutex<HashMap<PetId, Pet>>,
}

impl PetRegistry {
    pub fn new() -> Self {
        Self {
            pets: Mutex::new(HashMap::new()),
        }
    }

    /// Register a pet (seeding and tests)
    pub fn add_pet(&self, pet: Pet) -> Result<()> {
        self.lock()?.insert(pet.pet_id, pet);
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<PetId, Pet>>> {
        Ok(self.pets.lock().map_err(|_| "pet registry lock poisoned")?)
    }
}

impl Default for PetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PetRegistryTrait for PetRegistry {
    async fn find_by_id(&self, pet_id: PetId) -> Result<Option<Pet>> {
        Ok(self.lock()?.get(&pet_id).cloned())
    }

    async fn find_by_ids(&self, pet_ids: &[PetId]) -> Result<Vec<Pet>> {
        let pets = self.lock()?;
        Ok(pet_ids.iter().filter_map(|id| pets.get(id).cloned()).collect())
    }

    async fn save(&self, pet: Pet) -> Result<Pet> {
        self.lock()?.insert(pet.pet_id, pet.clone());
        Ok(pet)
    }

    async fn claim_if_available(&self, pet_id: PetId) -> Result<ClaimOutcome> {
        let mut pets = self.lock()?;

        let Some(pet) = pets.get_mut(&pet_id) else {
            return Ok(ClaimOutcome::NotFound);
        };

        match domain::pet::claim(pet, Utc::now()) {
            Ok(claimed) => {
                *pet = claimed.clone();
                Ok(ClaimOutcome::Claimed(claimed))
            }
            Err(_) => Ok(ClaimOutcome::Unavailable),
        }
    }

    async fn release(&self, pet_id: PetId) -> Result<()> {
        let mut pets = self.lock()?;
        if let Some(pet) = pets.get_mut(&pet_id) {
            *pet = domain::pet::release(pet, Utc::now());
        }
        Ok(())
    }
}
