//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging helpers
//! for the ledger, catalog and venue operations.

use tracing::{debug, error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::LoggingConfig;
use crate::utils::errors::{CampusError, Result};

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file appender when dropped and must be held
/// for the lifetime of the process.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.directory, &config.file_prefix);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking),
        )
        .try_init()
        .map_err(|e| CampusError::Config(format!("Failed to install subscriber: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log registration ledger actions
pub fn log_registration_action(event_id: Uuid, user_id: Uuid, action: &str, details: Option<&str>) {
    info!(
        event_id = %event_id,
        user_id = %user_id,
        action = action,
        details = details,
        "Registration action performed"
    );
}

/// Log a registration attempt that the ledger turned down
pub fn log_registration_rejected(event_id: Uuid, user_id: Uuid, reason: &str) {
    warn!(
        event_id = %event_id,
        user_id = %user_id,
        reason = reason,
        "Registration rejected"
    );
}

/// Log event management actions
pub fn log_event_action(event_id: Uuid, action: &str, user_id: Uuid, details: Option<&str>) {
    info!(
        event_id = %event_id,
        action = action,
        user_id = %user_id,
        details = details,
        "Event action performed"
    );
}

/// Log venue administration actions
pub fn log_venue_action(venue_id: Uuid, action: &str, admin_id: Uuid, details: Option<&str>) {
    info!(
        venue_id = %venue_id,
        action = action,
        admin_id = %admin_id,
        details = details,
        "Venue action performed"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
