//! Campus Events
//!
//! Event capacity and registration ledger for a university events backend.
//! Students register for events, teachers and admins publish them, admins
//! manage the venues they take place in, and dashboards aggregate the counts.

pub mod config;
pub mod database;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{CampusError, ErrorKind, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::{ServiceFactory, Session};
pub use utils::clock::{Clock, FixedClock, SystemClock};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
