//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod availability;
pub mod catalog;
pub mod dashboard;
pub mod images;
pub mod ledger;
pub mod venues;

// Re-export commonly used services
pub use auth::{AuthService, DashboardKind, Permission, Session};
pub use availability::EventStatus;
pub use catalog::{apply_filter, filter_by_category, EventCatalog};
pub use dashboard::{AdminStats, DashboardService, DashboardStats, StudentStats, TeacherStats};
pub use images::{ImagePolicy, ImageUpload, ObjectLocation};
pub use ledger::RegistrationLedger;
pub use venues::VenueRegistry;

use std::sync::Arc;

use uuid::Uuid;

use crate::config::settings::Settings;
use crate::database::DatabaseService;
use crate::utils::clock::Clock;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub catalog: EventCatalog,
    pub ledger: RegistrationLedger,
    pub venues: VenueRegistry,
    pub dashboard: DashboardService,
    pub images: ImagePolicy,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one storage
    /// backend and one clock
    pub fn new(settings: &Settings, database: DatabaseService, clock: Arc<dyn Clock>) -> Self {
        Self {
            auth_service: AuthService::new(database.profiles.clone()),
            catalog: EventCatalog::new(
                database.events.clone(),
                clock.clone(),
                settings.catalog.clone(),
            ),
            ledger: RegistrationLedger::new(
                database.events.clone(),
                database.registrations.clone(),
                clock.clone(),
            ),
            venues: VenueRegistry::new(database.venues.clone()),
            dashboard: DashboardService::new(
                database.events.clone(),
                database.registrations.clone(),
                database.venues.clone(),
                clock,
            ),
            images: ImagePolicy::new(settings.images.clone()),
            database,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let storage_error = match self.database.profiles.find_by_id(Uuid::nil()).await {
            Ok(_) => None,
            Err(e) => {
                tracing::error!(error = %e, "Storage health probe failed");
                Some(e.to_string())
            }
        };

        ServiceHealthStatus { storage_error }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub storage_error: Option<String>,
}

impl ServiceHealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.storage_error.is_none()
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        self.storage_error
            .iter()
            .map(|e| format!("Storage unavailable: {}", e))
            .collect()
    }
}
