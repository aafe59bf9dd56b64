//! Database module
//!
//! Storage traits, their PostgreSQL and in-memory implementations, and
//! connection management

pub mod connection;
pub mod memory;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{create_pool, health_check, run_migrations, DatabasePool};
pub use memory::MemoryStore;
pub use repositories::{EventRepository, ProfileRepository, RegistrationRepository, VenueRepository};
pub use service::DatabaseService;
pub use store::{EventOrder, EventQuery, EventStore, ProfileStore, RegistrationStore, VenueStore};
