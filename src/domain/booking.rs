use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    BookingId, ContactInfo, Pet, PetId, RequestBookingError, TransitionError, UserId, pet,
};

// ============================================================================
// Status and transition policy
// ============================================================================

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Requested, waiting for an admin
    Pending,
    /// Accepted by an admin
    Confirmed,
    /// Withdrawn; the pet's claim is released
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a booking in this status holds a claim on its pet
    pub fn claims_pet(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

/// Which status transitions an admin may perform.
///
/// `Permissive` allows any status to move to any other status, matching the
/// behaviour the marketplace has always had. `Strict` applies the transition
/// table below and makes `cancelled` terminal:
///
/// ```text
/// pending   -> confirmed | cancelled
/// confirmed -> pending   | cancelled
/// ```
///
/// Same-status updates are accepted under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    pub fn permits(&self, from: BookingStatus, to: BookingStatus) -> bool {
        if from == to {
            return true;
        }

        match self {
            TransitionPolicy::Permissive => true,
            TransitionPolicy::Strict => matches!(
                (from, to),
                (BookingStatus::Pending, BookingStatus::Confirmed)
                    | (BookingStatus::Pending, BookingStatus::Cancelled)
                    | (BookingStatus::Confirmed, BookingStatus::Pending)
                    | (BookingStatus::Confirmed, BookingStatus::Cancelled)
            ),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPolicy::Permissive => "permissive",
            TransitionPolicy::Strict => "strict",
        }
    }
}

impl std::str::FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            _ => Err(format!("Invalid transition policy: {}", s)),
        }
    }
}

// ============================================================================
// Booking aggregate
// ============================================================================

/// Booking aggregate - one adoption request for one pet
///
/// `pet_id`, `user_id` and `contact` are fixed at creation; `status` is the
/// only field an admin can change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,

    pub pet_id: PetId,
    pub user_id: UserId,
    pub contact: ContactInfo,

    pub status: BookingStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Side effect a status change has on the booked pet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityCascade {
    /// The pet is untouched
    None,
    /// The pet's claim is released (`available = true`)
    ReleasePet(PetId),
}

/// Outcome of [`change_status`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub booking: Booking,
    pub previous: BookingStatus,
    pub cascade: AvailabilityCascade,
}

impl StatusChange {
    /// Same-status update: nothing to persist
    pub fn is_noop(&self) -> bool {
        self.previous == self.booking.status
    }

    /// A cancelled booking moved back to pending/confirmed.
    ///
    /// The pet is not reclaimed and its availability is not re-checked.
    pub fn reopens_cancelled(&self) -> bool {
        self.previous == BookingStatus::Cancelled && self.booking.status.claims_pet()
    }
}

/// Pure function: open a pending booking for an already-claimed pet.
pub fn open(
    pet_id: PetId,
    user_id: UserId,
    contact: ContactInfo,
    requested_at: DateTime<Utc>,
) -> Booking {
    Booking {
        booking_id: BookingId::new(),
        pet_id,
        user_id,
        contact,
        status: BookingStatus::Pending,
        created_at: requested_at,
        updated_at: requested_at,
    }
}

/// Pure function: request a booking for a pet.
///
/// Business rules:
/// - the pet must be available
/// - the booking starts as pending
/// - the pet becomes unavailable
///
/// Returns the new booking and the claimed pet. No side effects.
pub fn request_booking(
    pet: &Pet,
    user_id: UserId,
    contact: ContactInfo,
    requested_at: DateTime<Utc>,
) -> Result<(Booking, Pet), RequestBookingError> {
    let claimed = pet::claim(pet, requested_at)?;
    let booking = open(pet.pet_id, user_id, contact, requested_at);

    Ok((booking, claimed))
}

/// Pure function: change a booking's status.
///
/// Business rules:
/// - the transition must be allowed by `policy`
/// - entering `cancelled` from a claiming status releases the pet
/// - no other transition touches the pet
/// - same-status updates change nothing (not even `updated_at`)
pub fn change_status(
    booking: &Booking,
    new_status: BookingStatus,
    policy: TransitionPolicy,
    changed_at: DateTime<Utc>,
) -> Result<StatusChange, TransitionError> {
    let previous = booking.status;

    if !policy.permits(previous, new_status) {
        return Err(TransitionError::NotPermitted {
            from: previous,
            to: new_status,
        });
    }

    if previous == new_status {
        return Ok(StatusChange {
            booking: booking.clone(),
            previous,
            cascade: AvailabilityCascade::None,
        });
    }

    let cascade = if previous.claims_pet() && !new_status.claims_pet() {
        AvailabilityCascade::ReleasePet(booking.pet_id)
    } else {
        AvailabilityCascade::None
    };

    Ok(StatusChange {
        booking: Booking {
            status: new_status,
            updated_at: changed_at,
            ..booking.clone()
        },
        previous,
        cascade,
    })
}
