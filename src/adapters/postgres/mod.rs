pub mod booking_repository;
pub mod pet_registry;
pub mod user_directory;

// Re-export the adapters under Postgres-specific names
pub use booking_repository::BookingRepository as PostgresBookingRepository;
pub use pet_registry::PetRegistry as PostgresPetRegistry;
pub use user_directory::UserDirectory as PostgresUserDirectory;
