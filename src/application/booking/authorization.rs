use crate::domain::{Caller, Identity};

use super::errors::{BookingApplicationError, Result};

/// Require any authenticated caller.
pub fn require_authenticated(caller: &Caller) -> Result<&Identity> {
    caller
        .identity()
        .ok_or(BookingApplicationError::AuthenticationRequired)
}

/// Require an admin.
///
/// Identity presence is checked before role, so an anonymous caller always
/// gets `AuthenticationRequired`, never `AuthorizationDenied`.
pub fn require_admin(caller: &Caller) -> Result<&Identity> {
    let identity = require_authenticated(caller)?;
    if !identity.is_admin() {
        return Err(BookingApplicationError::AuthorizationDenied);
    }
    Ok(identity)
}
