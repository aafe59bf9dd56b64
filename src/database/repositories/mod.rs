//! Database repositories module
//!
//! PostgreSQL implementations of the storage traits

pub mod event;
pub mod profile;
pub mod registration;
pub mod venue;

// Re-export repositories
pub use event::EventRepository;
pub use profile::ProfileRepository;
pub use registration::RegistrationRepository;
pub use venue::VenueRepository;
