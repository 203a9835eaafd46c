use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pet_adoption_booking::application::booking::{
    BookingApplicationError, ClaimStrategy, ErrorKind, LifecyclePolicy, ServiceDependencies,
    create_booking, get_all_bookings, get_user_bookings, get_user_bookings_by_id,
    update_booking_status,
};
use pet_adoption_booking::domain::commands::*;
use pet_adoption_booking::domain::*;
use pet_adoption_booking::ports::{
    BookingRepository, ClaimOutcome, PetRegistry, booking_repository, pet_registry,
};
use std::sync::Arc;
use tokio::sync::Barrier;

mod common;

use common::{MockStores, booking_request};

// ============================================================================
// Helpers
// ============================================================================

fn user(user_id: UserId) -> Caller {
    Caller::from(Identity::user(user_id))
}

fn admin() -> Caller {
    Caller::from(Identity::admin(UserId::new()))
}

fn set_status(booking_id: BookingId, status: &str) -> UpdateBookingStatus {
    UpdateBookingStatus {
        booking_id,
        status: Some(status.to_string()),
    }
}

async fn pet_available(stores: &MockStores, pet_id: PetId) -> bool {
    stores
        .pets
        .find_by_id(pet_id)
        .await
        .unwrap()
        .expect("pet should exist")
        .available
}

async fn stored_booking(stores: &MockStores, booking_id: BookingId) -> Booking {
    stores
        .bookings
        .get_by_id(booking_id)
        .await
        .unwrap()
        .expect("booking should exist")
}

/// PetRegistry whose reads wait at a barrier, so concurrent requests all
/// observe the pet before any of them writes.
struct GatedPetRegistry {
    inner: Arc<dyn PetRegistry>,
    gate: Barrier,
}

#[async_trait]
impl PetRegistry for GatedPetRegistry {
    async fn find_by_id(&self, pet_id: PetId) -> pet_registry::Result<Option<Pet>> {
        let pet = self.inner.find_by_id(pet_id).await?;
        self.gate.wait().await;
        Ok(pet)
    }

    async fn find_by_ids(&self, pet_ids: &[PetId]) -> pet_registry::Result<Vec<Pet>> {
        self.inner.find_by_ids(pet_ids).await
    }

    async fn save(&self, pet: Pet) -> pet_registry::Result<Pet> {
        self.inner.save(pet).await
    }

    async fn claim_if_available(&self, pet_id: PetId) -> pet_registry::Result<ClaimOutcome> {
        self.inner.claim_if_available(pet_id).await
    }

    async fn release(&self, pet_id: PetId) -> pet_registry::Result<()> {
        self.inner.release(pet_id).await
    }
}

/// PetRegistry whose release always fails
struct ReleaseFailingPetRegistry {
    inner: Arc<dyn PetRegistry>,
}

#[async_trait]
impl PetRegistry for ReleaseFailingPetRegistry {
    async fn find_by_id(&self, pet_id: PetId) -> pet_registry::Result<Option<Pet>> {
        self.inner.find_by_id(pet_id).await
    }

    async fn find_by_ids(&self, pet_ids: &[PetId]) -> pet_registry::Result<Vec<Pet>> {
        self.inner.find_by_ids(pet_ids).await
    }

    async fn save(&self, pet: Pet) -> pet_registry::Result<Pet> {
        self.inner.save(pet).await
    }

    async fn claim_if_available(&self, pet_id: PetId) -> pet_registry::Result<ClaimOutcome> {
        self.inner.claim_if_available(pet_id).await
    }

    async fn release(&self, _pet_id: PetId) -> pet_registry::Result<()> {
        Err("pet store unreachable".into())
    }
}

/// PetRegistry whose save always fails
struct SaveFailingPetRegistry {
    inner: Arc<dyn PetRegistry>,
}

#[async_trait]
impl PetRegistry for SaveFailingPetRegistry {
    async fn find_by_id(&self, pet_id: PetId) -> pet_registry::Result<Option<Pet>> {
        self.inner.find_by_id(pet_id).await
    }

    async fn find_by_ids(&self, pet_ids: &[PetId]) -> pet_registry::Result<Vec<Pet>> {
        self.inner.find_by_ids(pet_ids).await
    }

    async fn save(&self, _pet: Pet) -> pet_registry::Result<Pet> {
        Err("pet store unreachable".into())
    }

    async fn claim_if_available(&self, pet_id: PetId) -> pet_registry::Result<ClaimOutcome> {
        self.inner.claim_if_available(pet_id).await
    }

    async fn release(&self, pet_id: PetId) -> pet_registry::Result<()> {
        self.inner.release(pet_id).await
    }
}

/// BookingRepository that rejects inserts and lost status races
struct FaultyBookingRepository {
    inner: Arc<dyn BookingRepository>,
    fail_insert: bool,
    lose_status_race: bool,
}

#[async_trait]
impl BookingRepository for FaultyBookingRepository {
    async fn insert(&self, booking: Booking) -> booking_repository::Result<()> {
        if self.fail_insert {
            return Err("booking store unreachable".into());
        }
        self.inner.insert(booking).await
    }

    async fn get_by_id(&self, booking_id: BookingId) -> booking_repository::Result<Option<Booking>> {
        self.inner.get_by_id(booking_id).await
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        expected: BookingStatus,
        status: BookingStatus,
        updated_at: DateTime<Utc>,
    ) -> booking_repository::Result<bool> {
        if self.lose_status_race {
            return Ok(false);
        }
        self.inner
            .update_status(booking_id, expected, status, updated_at)
            .await
    }

    async fn find_by_user(&self, user_id: UserId) -> booking_repository::Result<Vec<Booking>> {
        self.inner.find_by_user(user_id).await
    }

    async fn find_all(&self) -> booking_repository::Result<Vec<Booking>> {
        self.inner.find_all().await
    }
}

// ============================================================================
// create_booking
// ============================================================================

#[tokio::test]
async fn test_create_booking_claims_pet() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let details = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();

    assert_eq!(details.booking.status, BookingStatus::Pending);
    assert_eq!(details.booking.pet_id, pet.pet_id);
    assert_eq!(details.booking.user_id, user_id);
    assert_eq!(details.booking.contact.name(), "Asha Rao");
    assert!(!details.pet.expect("pet resolved").available);

    assert!(!pet_available(&stores, pet.pet_id).await);
    let stored = stored_booking(&stores, details.booking.booking_id).await;
    assert_eq!(stored, details.booking);
}

#[tokio::test]
async fn test_create_booking_with_check_then_set() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy {
        claim_strategy: ClaimStrategy::CheckThenSet,
        ..LifecyclePolicy::default()
    });
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let details = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();

    assert_eq!(details.booking.status, BookingStatus::Pending);
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_create_booking_fails_when_pet_unavailable() {
    for strategy in [ClaimStrategy::Conditional, ClaimStrategy::CheckThenSet] {
        let stores = MockStores::new();
        let deps = stores.deps(LifecyclePolicy {
            claim_strategy: strategy,
            ..LifecyclePolicy::default()
        });
        let pet = stores.add_pet("Milo");
        let first = stores.add_user("Asha");
        let second = stores.add_user("Ravi");

        create_booking(&deps, &user(first), booking_request(pet.pet_id))
            .await
            .unwrap();

        let err = create_booking(&deps, &user(second), booking_request(pet.pet_id))
            .await
            .unwrap_err();

        assert!(matches!(err, BookingApplicationError::PetNotAvailable));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(stores.bookings.find_by_user(second).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_create_booking_for_unknown_pet() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let user_id = stores.add_user("Asha");

    let err = create_booking(&deps, &user(user_id), booking_request(PetId::new()))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::PetNotFound));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_create_booking_requires_pet_id() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let user_id = stores.add_user("Asha");

    let cmd = RequestBooking {
        pet_id: None,
        ..booking_request(PetId::new())
    };

    let err = create_booking(&deps, &user(user_id), cmd).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Pet ID is required");
}

#[tokio::test]
async fn test_create_booking_requires_contact_fields() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let cmd = RequestBooking {
        address: Some("   ".to_string()),
        ..booking_request(pet.pet_id)
    };

    let err = create_booking(&deps, &user(user_id), cmd).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "address is required");
    assert!(pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_create_booking_for_unknown_user() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");

    let err = create_booking(&deps, &user(UserId::new()), booking_request(pet.pet_id))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::UserNotFound));
    assert!(pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_create_booking_requires_authentication() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");

    let err = create_booking(&deps, &Caller::Anonymous, booking_request(pet.pet_id))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);
    assert!(pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_failed_booking_write_releases_claim() {
    let stores = MockStores::new();
    let deps = ServiceDependencies {
        booking_repository: Arc::new(FaultyBookingRepository {
            inner: stores.bookings.clone(),
            fail_insert: true,
            lose_status_race: false,
        }),
        ..stores.deps(LifecyclePolicy::default())
    };
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let err = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::BookingRepositoryError(_)));
    assert_eq!(err.kind(), ErrorKind::StoreFailure);
    assert!(pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_check_then_set_failed_pet_write_leaves_booking_behind() {
    let stores = MockStores::new();
    let deps = ServiceDependencies {
        pet_registry: Arc::new(SaveFailingPetRegistry {
            inner: stores.pets.clone(),
        }),
        ..stores.deps(LifecyclePolicy {
            claim_strategy: ClaimStrategy::CheckThenSet,
            ..LifecyclePolicy::default()
        })
    };
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let err = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::PetRegistryError(_)));
    assert_eq!(err.kind(), ErrorKind::StoreFailure);

    // The booking write already landed; the availability write did not
    let stored = stores.bookings.find_by_user(user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, BookingStatus::Pending);
    assert_eq!(stored[0].pet_id, pet.pet_id);
    assert!(pet_available(&stores, pet.pet_id).await);
}

// ============================================================================
// Concurrent requests for the same pet
// ============================================================================

#[tokio::test]
async fn test_check_then_set_race_admits_both_requests() {
    let stores = MockStores::new();
    let deps = ServiceDependencies {
        pet_registry: Arc::new(GatedPetRegistry {
            inner: stores.pets.clone(),
            gate: Barrier::new(2),
        }),
        ..stores.deps(LifecyclePolicy {
            claim_strategy: ClaimStrategy::CheckThenSet,
            ..LifecyclePolicy::default()
        })
    };
    let pet = stores.add_pet("Milo");
    let first = stores.add_user("Asha");
    let second = stores.add_user("Ravi");

    let first_user = user(first);
    let second_user = user(second);
    let (a, b) = tokio::join!(
        create_booking(&deps, &first_user, booking_request(pet.pet_id)),
        create_booking(&deps, &second_user, booking_request(pet.pet_id)),
    );

    // Both saw the pet as available before either write landed
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(stores.bookings.find_all().await.unwrap().len(), 2);
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_conditional_claim_admits_one_request() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let first = stores.add_user("Asha");
    let second = stores.add_user("Ravi");

    let first_user = user(first);
    let second_user = user(second);
    let (a, b) = tokio::join!(
        create_booking(&deps, &first_user, booking_request(pet.pet_id)),
        create_booking(&deps, &second_user, booking_request(pet.pet_id)),
    );

    let outcomes = [a, b];
    let admitted = outcomes.iter().filter(|r| r.is_ok()).count();
    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(e) if e.kind() == ErrorKind::Conflict))
        .count();

    assert_eq!(admitted, 1);
    assert_eq!(conflicts, 1);
    assert_eq!(stores.bookings.find_all().await.unwrap().len(), 1);
}

// ============================================================================
// update_booking_status
// ============================================================================

#[tokio::test]
async fn test_cancel_releases_pet() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    let confirmed = update_booking_status(&deps, &admin(), set_status(booking_id, "confirmed"))
        .await
        .unwrap();
    assert_eq!(confirmed.booking.status, BookingStatus::Confirmed);
    assert!(!pet_available(&stores, pet.pet_id).await);

    let cancelled = update_booking_status(&deps, &admin(), set_status(booking_id, "cancelled"))
        .await
        .unwrap();
    assert_eq!(cancelled.booking.status, BookingStatus::Cancelled);
    assert!(cancelled.pet.expect("pet resolved").available);
    assert!(pet_available(&stores, pet.pet_id).await);
    assert_eq!(
        stored_booking(&stores, booking_id).await.status,
        BookingStatus::Cancelled
    );
}

#[tokio::test]
async fn test_create_cancel_rebook_scenario() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let first = stores.add_user("Asha");
    let second = stores.add_user("Ravi");

    let created = create_booking(&deps, &user(first), booking_request(pet.pet_id))
        .await
        .unwrap();

    let err = create_booking(&deps, &user(second), booking_request(pet.pet_id))
        .await
        .unwrap_err();
    assert!(matches!(err, BookingApplicationError::PetNotAvailable));

    update_booking_status(
        &deps,
        &admin(),
        set_status(created.booking.booking_id, "cancelled"),
    )
    .await
    .unwrap();

    let rebooked = create_booking(&deps, &user(second), booking_request(pet.pet_id))
        .await
        .unwrap();
    assert_eq!(rebooked.booking.status, BookingStatus::Pending);
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_invalid_status_changes_nothing() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    let err = update_booking_status(&deps, &admin(), set_status(booking_id, "approved"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "Invalid status");

    let missing = UpdateBookingStatus {
        booking_id,
        status: None,
    };
    let err = update_booking_status(&deps, &admin(), missing)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Status is required");

    // Only the exact lowercase names are accepted
    let err = update_booking_status(&deps, &admin(), set_status(booking_id, " cancelled "))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid status");

    assert_eq!(stored_booking(&stores, booking_id).await, created.booking);
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_same_status_update_is_idempotent() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    let updated = update_booking_status(&deps, &admin(), set_status(booking_id, "pending"))
        .await
        .unwrap();

    assert_eq!(updated.booking, created.booking);
    assert_eq!(stored_booking(&stores, booking_id).await, created.booking);
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_reopening_cancelled_booking_leaves_pet_alone() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    update_booking_status(&deps, &admin(), set_status(booking_id, "cancelled"))
        .await
        .unwrap();
    let reopened = update_booking_status(&deps, &admin(), set_status(booking_id, "pending"))
        .await
        .unwrap();

    assert_eq!(reopened.booking.status, BookingStatus::Pending);
    assert!(pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_strict_policy_rejects_reopening() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy {
        transition_policy: TransitionPolicy::Strict,
        ..LifecyclePolicy::default()
    });
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    update_booking_status(&deps, &admin(), set_status(booking_id, "cancelled"))
        .await
        .unwrap();

    let err = update_booking_status(&deps, &admin(), set_status(booking_id, "pending"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BookingApplicationError::InvalidTransition {
            from: BookingStatus::Cancelled,
            to: BookingStatus::Pending,
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(
        stored_booking(&stores, booking_id).await.status,
        BookingStatus::Cancelled
    );
}

#[tokio::test]
async fn test_failed_release_reverts_status() {
    let stores = MockStores::new();
    let deps = ServiceDependencies {
        pet_registry: Arc::new(ReleaseFailingPetRegistry {
            inner: stores.pets.clone(),
        }),
        ..stores.deps(LifecyclePolicy::default())
    };
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    let err = update_booking_status(&deps, &admin(), set_status(booking_id, "cancelled"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::PetRegistryError(_)));
    assert_eq!(
        stored_booking(&stores, booking_id).await.status,
        BookingStatus::Pending
    );
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_lost_status_race_is_reported() {
    let stores = MockStores::new();
    let deps = ServiceDependencies {
        booking_repository: Arc::new(FaultyBookingRepository {
            inner: stores.bookings.clone(),
            fail_insert: false,
            lose_status_race: true,
        }),
        ..stores.deps(LifecyclePolicy::default())
    };
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();

    let err = update_booking_status(
        &deps,
        &admin(),
        set_status(created.booking.booking_id, "cancelled"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, BookingApplicationError::ConcurrentModification));
    assert!(!pet_available(&stores, pet.pet_id).await);
}

#[tokio::test]
async fn test_update_unknown_booking() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());

    let err = update_booking_status(&deps, &admin(), set_status(BookingId::new(), "confirmed"))
        .await
        .unwrap_err();

    assert!(matches!(err, BookingApplicationError::BookingNotFound));
}

#[tokio::test]
async fn test_update_status_requires_admin() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let pet = stores.add_pet("Milo");
    let user_id = stores.add_user("Asha");

    let created = create_booking(&deps, &user(user_id), booking_request(pet.pet_id))
        .await
        .unwrap();
    let booking_id = created.booking.booking_id;

    let err = update_booking_status(&deps, &user(user_id), set_status(booking_id, "cancelled"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationDenied);

    // Identity is checked before role
    let err = update_booking_status(&deps, &Caller::Anonymous, set_status(booking_id, "bogus"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);

    assert_eq!(stored_booking(&stores, booking_id).await, created.booking);
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_user_bookings_are_scoped_and_newest_first() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let milo = stores.add_pet("Milo");
    let luna = stores.add_pet("Luna");
    let rex = stores.add_pet("Rex");
    let asha = stores.add_user("Asha");
    let ravi = stores.add_user("Ravi");

    let older = create_booking(&deps, &user(asha), booking_request(milo.pet_id))
        .await
        .unwrap();
    let newer = create_booking(&deps, &user(asha), booking_request(luna.pet_id))
        .await
        .unwrap();
    create_booking(&deps, &user(ravi), booking_request(rex.pet_id))
        .await
        .unwrap();

    let listed = get_user_bookings(&deps, &user(asha)).await.unwrap();

    let ids: Vec<BookingId> = listed.iter().map(|d| d.booking.booking_id).collect();
    assert_eq!(ids, vec![newer.booking.booking_id, older.booking.booking_id]);
    assert_eq!(
        listed[0].pet.as_ref().map(|p| p.pet_id),
        Some(luna.pet_id)
    );
    assert!(listed.iter().all(|d| d.user.is_none()));
}

#[tokio::test]
async fn test_admin_listing_resolves_users() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let milo = stores.add_pet("Milo");
    let luna = stores.add_pet("Luna");
    let asha = stores.add_user("Asha");
    let ravi = stores.add_user("Ravi");

    create_booking(&deps, &user(asha), booking_request(milo.pet_id))
        .await
        .unwrap();
    create_booking(&deps, &user(ravi), booking_request(luna.pet_id))
        .await
        .unwrap();

    let listed = get_all_bookings(&deps, &admin()).await.unwrap();

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].booking.user_id, ravi);
    assert_eq!(listed[0].user.as_ref().map(|u| u.name.as_str()), Some("Ravi"));
    assert_eq!(listed[1].user.as_ref().map(|u| u.user_id), Some(asha));
}

#[tokio::test]
async fn test_listing_keeps_bookings_of_deleted_pets() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let asha = stores.add_user("Asha");
    let orphan = pet_adoption_booking::domain::booking::open(
        PetId::new(),
        asha,
        ContactInfo::new("Asha Rao", "555-0199", "12 Lake Road").unwrap(),
        Utc::now(),
    );
    stores.bookings.insert(orphan.clone()).await.unwrap();

    let listed = get_user_bookings_by_id(&deps, &admin(), asha).await.unwrap();

    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].booking, orphan);
    assert!(listed[0].pet.is_none());
}

#[tokio::test]
async fn test_admin_queries_require_admin() {
    let stores = MockStores::new();
    let deps = stores.deps(LifecyclePolicy::default());
    let asha = stores.add_user("Asha");

    let err = get_all_bookings(&deps, &user(asha)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationDenied);

    let err = get_user_bookings_by_id(&deps, &user(asha), asha)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthorizationDenied);

    let err = get_all_bookings(&deps, &Caller::Anonymous)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);

    let err = get_user_bookings(&deps, &Caller::Anonymous)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AuthenticationRequired);
}
