//! Data models module
//!
//! This module contains all data structures used throughout the crate

pub mod event;
pub mod profile;
pub mod registration;
pub mod venue;

// Re-export commonly used models
pub use event::{
    CreateEventRequest, CreatorSummary, Event, EventCategory, EventFilter, EventSort,
    EventWithCount, ImageUpdate, UpdateEventRequest,
};
pub use profile::{Profile, Role};
pub use registration::{
    ContactInfo, Registration, RegistrationFilter, RegistrationQuery, RegistrationSort,
    RegistrationWithEvent,
};
pub use venue::{CreateVenueRequest, UpdateVenueRequest, Venue};
