//! Error handling for Campus Events
//!
//! This module defines the main error type used throughout the crate
//! and the coarse error kinds callers branch on.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for Campus Events
#[derive(Error, Debug)]
pub enum CampusError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("Permission denied: {0}")]
    Authorization(String),

    #[error("User {user_id} is already registered for event {event_id}")]
    Duplicate { event_id: Uuid, user_id: Uuid },

    #[error("Event {event_id} is full ({capacity} seats)")]
    Capacity { event_id: Uuid, capacity: i32 },

    #[error("Not allowed at this time: {0}")]
    Temporal(String),

    #[error("Venue '{venue}' is in use and cannot be deleted")]
    InUse { venue: String },

    #[error("Storage error: {0}")]
    Constraint(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`CampusError`] values.
///
/// Storage failures of any flavour (`sqlx`, migrations, opaque store errors)
/// collapse into [`ErrorKind::Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Authorization,
    Duplicate,
    Capacity,
    Temporal,
    InUse,
    Constraint,
    Internal,
}

/// Result type alias for Campus Events operations
pub type Result<T> = std::result::Result<T, CampusError>;

impl CampusError {
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        CampusError::NotFound { entity, id }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CampusError::Validation(_) => ErrorKind::Validation,
            CampusError::NotFound { .. } => ErrorKind::NotFound,
            CampusError::Authorization(_) => ErrorKind::Authorization,
            CampusError::Duplicate { .. } => ErrorKind::Duplicate,
            CampusError::Capacity { .. } => ErrorKind::Capacity,
            CampusError::Temporal(_) => ErrorKind::Temporal,
            CampusError::InUse { .. } => ErrorKind::InUse,
            CampusError::Constraint(_)
            | CampusError::Database(_)
            | CampusError::Migration(_) => ErrorKind::Constraint,
            CampusError::Config(_)
            | CampusError::ConfigLoad(_)
            | CampusError::Serialization(_)
            | CampusError::Io(_) => ErrorKind::Internal,
        }
    }

    /// Check if the error is recoverable by retrying the action manually
    pub fn is_recoverable(&self) -> bool {
        match self {
            CampusError::Validation(_) => false,
            CampusError::NotFound { .. } => false,
            CampusError::Authorization(_) => false,
            CampusError::Duplicate { .. } => false,
            // A seat may free up after a cancellation.
            CampusError::Capacity { .. } => true,
            CampusError::Temporal(_) => false,
            CampusError::InUse { .. } => true,
            CampusError::Constraint(_) => true,
            CampusError::Database(_) => true,
            CampusError::Migration(_) => false,
            CampusError::Config(_) => false,
            CampusError::ConfigLoad(_) => false,
            CampusError::Serialization(_) => false,
            CampusError::Io(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CampusError::Database(_) => ErrorSeverity::Critical,
            CampusError::Migration(_) => ErrorSeverity::Critical,
            CampusError::Config(_) | CampusError::ConfigLoad(_) => ErrorSeverity::Critical,
            CampusError::Authorization(_) => ErrorSeverity::Warning,
            CampusError::Validation(_)
            | CampusError::Duplicate { .. }
            | CampusError::Capacity { .. }
            | CampusError::Temporal(_)
            | CampusError::InUse { .. }
            | CampusError::NotFound { .. } => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
