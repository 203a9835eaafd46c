pub mod booking_repository;
pub mod identity_resolver;
pub mod pet_registry;
pub mod user_directory;

// Each port module keeps its own `Result` alias; reach it through the module path
pub use booking_repository::BookingRepository;
pub use identity_resolver::IdentityResolver;
pub use pet_registry::{ClaimOutcome, PetRegistry};
pub use user_directory::{UserDirectory, UserSummary};
