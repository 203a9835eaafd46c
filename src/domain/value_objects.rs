use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking ID - aggregate ID of the adoption booking context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

/// Pet ID - reference into the pet catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(Uuid);

impl PetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

/// User ID - reference into the account context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Contact snapshot captured when a booking is requested.
///
/// Invariant: every field is non-blank. Construction goes through
/// [`ContactInfo::new`], so an invalid snapshot cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    name: String,
    contact: String,
    address: String,
}

/// Contact field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Contact,
    Address,
}

impl ContactField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Contact => "contact",
            ContactField::Address => "address",
        }
    }
}

impl ContactInfo {
    /// Validates and trims the snapshot.
    ///
    /// # Errors
    /// Returns the first blank field, in `name`, `contact`, `address` order.
    pub fn new(
        name: impl Into<String>,
        contact: impl Into<String>,
        address: impl Into<String>,
    ) -> Result<Self, ContactField> {
        let name = required(name.into(), ContactField::Name)?;
        let contact = required(contact.into(), ContactField::Contact)?;
        let address = required(address.into(), ContactField::Address)?;

        Ok(Self {
            name,
            contact,
            address,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &str {
        &self.contact
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

fn required(value: String, field: ContactField) -> Result<String, ContactField> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(field);
    }
    Ok(trimmed.to_string())
}
