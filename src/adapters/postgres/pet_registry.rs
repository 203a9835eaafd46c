use crate::domain::{Pet, PetId, PetProfile};
use crate::ports::pet_registry::{ClaimOutcome, PetRegistry as PetRegistryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

/// Convert a `pets` row into a Pet
fn map_row_to_pet(row: &PgRow) -> Pet {
    Pet {
        pet_id: PetId::from_uuid(row.get("pet_id")),
        profile: PetProfile {
            name: row.get("name"),
            species: row.get("species"),
            breed: row.get("breed"),
            age: row.get("age"),
            gender: row.get("gender"),
            weight: row.get("weight"),
            color: row.get("color"),
            location: row.get("location"),
            price: row.get("price"),
            description: row.get("description"),
        },
        vaccinated: row.get("vaccinated"),
        image: row.get("image"),
        available: row.get("available"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// PostgreSQL implementation of PetRegistry
pub struct PetRegistry {
    pool: PgPool,
}

impl PetRegistry {
    /// Create a new PetRegistry with a PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRegistryTrait for PetRegistry {
    async fn find_by_id(&self, pet_id: PetId) -> Result<Option<Pet>> {
        let row = sqlx::query(
            r#"
            SELECT
                pet_id, name, species, breed, age, gender, weight, color,
                location, price, description, vaccinated, image, available,
                created_at, updated_at
            FROM pets
            WHERE pet_id = $1
            "#,
        )
        .bind(pet_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_pet))
    }

    async fn find_by_ids(&self, pet_ids: &[PetId]) -> Result<Vec<Pet>> {
        let ids: Vec<Uuid> = pet_ids.iter().map(PetId::value).collect();

        let rows = sqlx::query(
            r#"
            SELECT
                pet_id, name, species, breed, age, gender, weight, color,
                location, price, description, vaccinated, image, available,
                created_at, updated_at
            FROM pets
            WHERE pet_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_pet).collect())
    }

    /// Upsert the full pet record
    async fn save(&self, pet: Pet) -> Result<Pet> {
        sqlx::query(
            r#"
            INSERT INTO pets (
                pet_id, name, species, breed, age, gender, weight, color,
                location, price, description, vaccinated, image, available,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (pet_id)
            DO UPDATE SET
                name = EXCLUDED.name,
                species = EXCLUDED.species,
                breed = EXCLUDED.breed,
                age = EXCLUDED.age,
                gender = EXCLUDED.gender,
                weight = EXCLUDED.weight,
                color = EXCLUDED.color,
                location = EXCLUDED.location,
                price = EXCLUDED.price,
                description = EXCLUDED.description,
                vaccinated = EXCLUDED.vaccinated,
                image = EXCLUDED.image,
                available = EXCLUDED.available,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(pet.pet_id.value())
        .bind(&pet.profile.name)
        .bind(&pet.profile.species)
        .bind(&pet.profile.breed)
        .bind(&pet.profile.age)
        .bind(&pet.profile.gender)
        .bind(&pet.profile.weight)
        .bind(&pet.profile.color)
        .bind(&pet.profile.location)
        .bind(&pet.profile.price)
        .bind(&pet.profile.description)
        .bind(pet.vaccinated)
        .bind(&pet.image)
        .bind(pet.available)
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(pet)
    }

    /// Conditional UPDATE: only a row that is still available matches, so of
    /// two concurrent claims exactly one gets a row back.
    async fn claim_if_available(&self, pet_id: PetId) -> Result<ClaimOutcome> {
        let claimed = sqlx::query(
            r#"
            UPDATE pets
            SET available = FALSE, updated_at = NOW()
            WHERE pet_id = $1 AND available = TRUE
            RETURNING
                pet_id, name, species, breed, age, gender, weight, color,
                location, price, description, vaccinated, image, available,
                created_at, updated_at
            "#,
        )
        .bind(pet_id.value())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = claimed {
            return Ok(ClaimOutcome::Claimed(map_row_to_pet(&row)));
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pets WHERE pet_id = $1)")
            .bind(pet_id.value())
            .fetch_one(&self.pool)
            .await?;

        if exists {
            Ok(ClaimOutcome::Unavailable)
        } else {
            Ok(ClaimOutcome::NotFound)
        }
    }

    async fn release(&self, pet_id: PetId) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE pets
            SET available = TRUE, updated_at = NOW()
            WHERE pet_id = $1 AND available = FALSE
            "#,
        )
        .bind(pet_id.value())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
