use crate::domain::{self, commands::*, *};
use crate::ports::*;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use super::authorization::{require_admin, require_authenticated};
use super::errors::{BookingApplicationError, Result};

// ============================================================================
// Policy
// ============================================================================

/// How `create_booking` takes the pet's claim
///
/// - `Conditional`: atomic "set available = false where available = true" in
///   the registry, then the booking write. A failed booking write is
///   compensated by releasing the claim. Concurrent requests for one pet
///   cannot both succeed.
/// - `CheckThenSet`: read the pet, check the flag, write the booking, then
///   write the pet. Concurrent requests can all pass the check and all
///   succeed, and a failed pet write leaves a pending booking on an available
///   pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClaimStrategy {
    #[default]
    Conditional,
    CheckThenSet,
}

impl ClaimStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStrategy::Conditional => "conditional",
            ClaimStrategy::CheckThenSet => "check-then-set",
        }
    }
}

impl std::str::FromStr for ClaimStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "conditional" => Ok(ClaimStrategy::Conditional),
            "check-then-set" => Ok(ClaimStrategy::CheckThenSet),
            _ => Err(format!("Invalid claim strategy: {}", s)),
        }
    }
}

/// Tunable lifecycle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LifecyclePolicy {
    pub claim_strategy: ClaimStrategy,
    pub transition_policy: TransitionPolicy,
}

/// Service dependencies
///
/// Plain data handed to each lifecycle function, so every collaborator is
/// explicit and tests can swap any of them.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub pet_registry: Arc<dyn PetRegistry>,
    pub booking_repository: Arc<dyn BookingRepository>,
    pub user_directory: Arc<dyn UserDirectory>,
    pub policy: LifecyclePolicy,
}

/// A booking with its references resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetails {
    pub booking: Booking,
    /// `None` if the pet record has since disappeared
    pub pet: Option<Pet>,
    /// Filled only for admin listings
    pub user: Option<UserSummary>,
}

// ============================================================================
// Commands
// ============================================================================

/// Create a booking.
///
/// Business rules:
/// - the caller is authenticated and is a known user
/// - a pet ID and every contact field are present
/// - the pet exists and is available
/// - the booking starts as pending and the pet becomes unavailable
///
/// The two writes (booking, pet flag) are ordered and compensated according to
/// the configured [`ClaimStrategy`].
pub async fn create_booking(
    deps: &ServiceDependencies,
    caller: &Caller,
    cmd: RequestBooking,
) -> Result<BookingDetails> {
    let identity = require_authenticated(caller)?;

    let pet_id = cmd
        .pet_id
        .ok_or_else(|| BookingApplicationError::Validation("Pet ID is required".to_string()))?;

    let contact = ContactInfo::new(
        cmd.name.unwrap_or_default(),
        cmd.contact.unwrap_or_default(),
        cmd.address.unwrap_or_default(),
    )
    .map_err(RequestBookingError::from)?;

    let user_exists = deps
        .user_directory
        .exists(identity.user_id)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?;

    if !user_exists {
        return Err(BookingApplicationError::UserNotFound);
    }

    let requested_at = Utc::now();
    let (booking, pet) = match deps.policy.claim_strategy {
        ClaimStrategy::Conditional => {
            claim_then_insert(deps, pet_id, identity.user_id, contact, requested_at).await?
        }
        ClaimStrategy::CheckThenSet => {
            check_then_set(deps, pet_id, identity.user_id, contact, requested_at).await?
        }
    };

    tracing::info!(
        booking_id = %booking.booking_id.value(),
        pet_id = %pet_id.value(),
        user_id = %identity.user_id.value(),
        strategy = deps.policy.claim_strategy.as_str(),
        "booking created"
    );

    Ok(BookingDetails {
        booking,
        pet: Some(pet),
        user: None,
    })
}

async fn claim_then_insert(
    deps: &ServiceDependencies,
    pet_id: PetId,
    user_id: UserId,
    contact: ContactInfo,
    requested_at: DateTime<Utc>,
) -> Result<(Booking, Pet)> {
    let outcome = deps
        .pet_registry
        .claim_if_available(pet_id)
        .await
        .map_err(BookingApplicationError::PetRegistryError)?;

    let pet = match outcome {
        ClaimOutcome::Claimed(pet) => pet,
        ClaimOutcome::NotFound => return Err(BookingApplicationError::PetNotFound),
        ClaimOutcome::Unavailable => return Err(BookingApplicationError::PetNotAvailable),
    };

    let booking = domain::booking::open(pet_id, user_id, contact, requested_at);

    if let Err(e) = deps.booking_repository.insert(booking.clone()).await {
        release_claim(deps, pet_id).await;
        return Err(BookingApplicationError::BookingRepositoryError(e));
    }

    Ok((booking, pet))
}

/// Compensation for a booking write that failed after the claim was taken.
async fn release_claim(deps: &ServiceDependencies, pet_id: PetId) {
    match deps.pet_registry.release(pet_id).await {
        Ok(()) => tracing::warn!(
            pet_id = %pet_id.value(),
            "booking write failed, pet claim released"
        ),
        Err(e) => tracing::error!(
            pet_id = %pet_id.value(),
            error = %e,
            "booking write failed and pet claim could not be released; pet stays unavailable"
        ),
    }
}

async fn check_then_set(
    deps: &ServiceDependencies,
    pet_id: PetId,
    user_id: UserId,
    contact: ContactInfo,
    requested_at: DateTime<Utc>,
) -> Result<(Booking, Pet)> {
    let pet = deps
        .pet_registry
        .find_by_id(pet_id)
        .await
        .map_err(BookingApplicationError::PetRegistryError)?
        .ok_or(BookingApplicationError::PetNotFound)?;

    let (booking, claimed) = domain::booking::request_booking(&pet, user_id, contact, requested_at)?;

    // Until the pet write below lands, other requests still see the pet as available.
    deps.booking_repository
        .insert(booking.clone())
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    match deps.pet_registry.save(claimed).await {
        Ok(pet) => Ok((booking, pet)),
        Err(e) => {
            tracing::error!(
                booking_id = %booking.booking_id.value(),
                pet_id = %pet_id.value(),
                error = %e,
                "booking stored but pet availability not updated; pet is still listed as available"
            );
            Err(BookingApplicationError::PetRegistryError(e))
        }
    }
}

/// Change a booking's status (admin only).
///
/// Business rules:
/// - status is one of pending, confirmed, cancelled
/// - the transition is allowed by the configured [`TransitionPolicy`]
/// - entering cancelled releases the pet
/// - same-status updates write nothing
///
/// The status write is compare-and-set on the previous status. If the pet
/// release fails, the status write is reverted.
pub async fn update_booking_status(
    deps: &ServiceDependencies,
    caller: &Caller,
    cmd: UpdateBookingStatus,
) -> Result<BookingDetails> {
    require_admin(caller)?;

    let new_status = parse_status(cmd.status.as_deref())?;

    let booking = deps
        .booking_repository
        .get_by_id(cmd.booking_id)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?
        .ok_or(BookingApplicationError::BookingNotFound)?;

    let change = domain::booking::change_status(
        &booking,
        new_status,
        deps.policy.transition_policy,
        Utc::now(),
    )?;

    if change.is_noop() {
        tracing::debug!(
            booking_id = %booking.booking_id.value(),
            status = %new_status,
            "booking already in requested status"
        );
    } else {
        apply_status_change(deps, &change).await?;
    }

    let pet = deps
        .pet_registry
        .find_by_id(change.booking.pet_id)
        .await
        .map_err(BookingApplicationError::PetRegistryError)?;

    Ok(BookingDetails {
        booking: change.booking,
        pet,
        user: None,
    })
}

fn parse_status(raw: Option<&str>) -> Result<BookingStatus> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| BookingApplicationError::Validation("Status is required".to_string()))?;

    raw.parse::<BookingStatus>()
        .map_err(|_| BookingApplicationError::Validation("Invalid status".to_string()))
}

async fn apply_status_change(deps: &ServiceDependencies, change: &StatusChange) -> Result<()> {
    let booking = &change.booking;

    let updated = deps
        .booking_repository
        .update_status(
            booking.booking_id,
            change.previous,
            booking.status,
            booking.updated_at,
        )
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    if !updated {
        return Err(BookingApplicationError::ConcurrentModification);
    }

    if let AvailabilityCascade::ReleasePet(pet_id) = change.cascade {
        if let Err(e) = deps.pet_registry.release(pet_id).await {
            revert_status(deps, change).await;
            return Err(BookingApplicationError::PetRegistryError(e));
        }
        tracing::info!(
            booking_id = %booking.booking_id.value(),
            pet_id = %pet_id.value(),
            "pet released by cancellation"
        );
    }

    if change.reopens_cancelled() {
        tracing::warn!(
            booking_id = %booking.booking_id.value(),
            pet_id = %booking.pet_id.value(),
            status = %booking.status,
            "cancelled booking reopened; pet availability was not re-checked"
        );
    }

    tracing::info!(
        booking_id = %booking.booking_id.value(),
        from = %change.previous,
        to = %booking.status,
        "booking status updated"
    );

    Ok(())
}

/// Compensation for a cascade that failed after the status was written.
async fn revert_status(deps: &ServiceDependencies, change: &StatusChange) {
    let booking = &change.booking;

    let reverted = deps
        .booking_repository
        .update_status(
            booking.booking_id,
            booking.status,
            change.previous,
            Utc::now(),
        )
        .await;

    match reverted {
        Ok(true) => tracing::warn!(
            booking_id = %booking.booking_id.value(),
            status = %change.previous,
            "pet release failed, booking status reverted"
        ),
        Ok(false) => tracing::error!(
            booking_id = %booking.booking_id.value(),
            "pet release failed and booking status changed concurrently; not reverted"
        ),
        Err(e) => tracing::error!(
            booking_id = %booking.booking_id.value(),
            error = %e,
            "pet release failed and booking status could not be reverted"
        ),
    }
}

// ============================================================================
// Queries
// ============================================================================

/// Bookings of the calling user, newest first.
pub async fn get_user_bookings(
    deps: &ServiceDependencies,
    caller: &Caller,
) -> Result<Vec<BookingDetails>> {
    let identity = require_authenticated(caller)?;

    let bookings = deps
        .booking_repository
        .find_by_user(identity.user_id)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    resolve_pets(deps, bookings).await
}

/// Every booking, newest first, with pet and user resolved (admin only).
pub async fn get_all_bookings(
    deps: &ServiceDependencies,
    caller: &Caller,
) -> Result<Vec<BookingDetails>> {
    require_admin(caller)?;

    let bookings = deps
        .booking_repository
        .find_all()
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    let mut details = resolve_pets(deps, bookings).await?;
    resolve_users(deps, &mut details).await?;

    Ok(details)
}

/// Bookings of another user, newest first (admin only).
pub async fn get_user_bookings_by_id(
    deps: &ServiceDependencies,
    caller: &Caller,
    user_id: UserId,
) -> Result<Vec<BookingDetails>> {
    require_admin(caller)?;

    let bookings = deps
        .booking_repository
        .find_by_user(user_id)
        .await
        .map_err(BookingApplicationError::BookingRepositoryError)?;

    resolve_pets(deps, bookings).await
}

async fn resolve_pets(
    deps: &ServiceDependencies,
    bookings: Vec<Booking>,
) -> Result<Vec<BookingDetails>> {
    let mut pet_ids: Vec<PetId> = bookings.iter().map(|b| b.pet_id).collect();
    pet_ids.sort_by_key(|id| id.value());
    pet_ids.dedup();

    let pets: HashMap<PetId, Pet> = if pet_ids.is_empty() {
        HashMap::new()
    } else {
        deps.pet_registry
            .find_by_ids(&pet_ids)
            .await
            .map_err(BookingApplicationError::PetRegistryError)?
            .into_iter()
            .map(|pet| (pet.pet_id, pet))
            .collect()
    };

    Ok(bookings
        .into_iter()
        .map(|booking| {
            let pet = pets.get(&booking.pet_id).cloned();
            BookingDetails {
                booking,
                pet,
                user: None,
            }
        })
        .collect())
}

async fn resolve_users(deps: &ServiceDependencies, details: &mut [BookingDetails]) -> Result<()> {
    let mut user_ids: Vec<UserId> = details.iter().map(|d| d.booking.user_id).collect();
    user_ids.sort_by_key(|id| id.value());
    user_ids.dedup();

    if user_ids.is_empty() {
        return Ok(());
    }

    let users: HashMap<UserId, UserSummary> = deps
        .user_directory
        .find_summaries(&user_ids)
        .await
        .map_err(BookingApplicationError::UserDirectoryError)?
        .into_iter()
        .map(|user| (user.user_id, user))
        .collect();

    for detail in details.iter_mut() {
        detail.user = users.get(&detail.booking.user_id).cloned();
    }

    Ok(())
}
