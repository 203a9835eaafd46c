pub mod booking_repository;
pub mod identity_resolver;
pub mod pet_registry;
pub mod user_directory;

pub use booking_repository::BookingRepository;
pub use identity_resolver::IdentityResolver;
pub use pet_registry::PetRegistry;
pub use user_directory::UserDirectory;
