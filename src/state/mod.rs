//! State management module
//!
//! Session-local planning state

pub mod planning;

// Re-export commonly used state components
pub use planning::{
    is_venue_available, reduce, venue_bookings, Booking, BookingStatus, PlannedVenue,
    PlanningAction, PlanningState, Resource, ResourceStatus,
};
