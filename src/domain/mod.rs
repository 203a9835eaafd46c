pub mod booking;
pub mod caller;
pub mod commands;
pub mod errors;
pub mod pet;
pub mod value_objects;

pub use booking::{
    AvailabilityCascade, Booking, BookingStatus, StatusChange, TransitionPolicy,
};
pub use caller::*;
pub use errors::*;
pub use pet::{Pet, PetProfile};
pub use value_objects::*;
