//! Authentication service implementation
//!
//! Resolves a user's profile into a [`Session`] once, then answers the
//! role-based capability checks every mutating operation needs.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::store::ProfileStore;
use crate::models::{Event, Role};
use crate::utils::errors::{CampusError, Result};

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Create events; edit or delete events one created
    ManageEvents,
    /// Create, edit and delete venues
    ManageVenues,
    /// Edit or delete any event regardless of creator
    ModerateEvents,
}

/// Dashboard variant shown to each role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardKind {
    Admin,
    Teacher,
    Student,
}

/// The authenticated caller, passed explicitly into every mutating operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: Uuid, name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        match permission {
            Permission::ManageEvents => matches!(self.role, Role::Admin | Role::Teacher),
            Permission::ManageVenues | Permission::ModerateEvents => self.role == Role::Admin,
        }
    }

    pub fn can_manage_events(&self) -> bool {
        self.has_permission(Permission::ManageEvents)
    }

    pub fn can_manage_venues(&self) -> bool {
        self.has_permission(Permission::ManageVenues)
    }

    /// Creator or admin
    pub fn can_modify_event(&self, event: &Event) -> bool {
        self.has_permission(Permission::ModerateEvents)
            || (self.can_manage_events() && event.created_by == self.user_id)
    }

    pub fn dashboard_kind(&self) -> DashboardKind {
        match self.role {
            Role::Admin => DashboardKind::Admin,
            Role::Teacher => DashboardKind::Teacher,
            Role::Student => DashboardKind::Student,
        }
    }

    /// Require specific permission or return error
    pub fn require(&self, permission: Permission) -> Result<()> {
        if self.has_permission(permission) {
            return Ok(());
        }

        warn!(user_id = %self.user_id, role = %self.role, permission = ?permission, "Permission denied");
        Err(CampusError::Authorization(format!(
            "{} role lacks required permission: {:?}",
            self.role, permission
        )))
    }

    /// Require that the caller may edit or delete `event`
    pub fn require_event_owner(&self, event: &Event) -> Result<()> {
        if self.can_modify_event(event) {
            return Ok(());
        }

        warn!(user_id = %self.user_id, event_id = %event.id, "Event modification denied");
        Err(CampusError::Authorization(
            "Only the event creator or an admin may modify this event".to_string(),
        ))
    }
}

/// Turns user ids into sessions by reading their profiles
#[derive(Clone)]
pub struct AuthService {
    profiles: Arc<dyn ProfileStore>,
}

impl AuthService {
    pub fn new(profiles: Arc<dyn ProfileStore>) -> Self {
        Self { profiles }
    }

    /// Look up the profile of `user_id` and build its session
    pub async fn resolve_session(&self, user_id: Uuid) -> Result<Session> {
        debug!(user_id = %user_id, "Resolving session");

        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| CampusError::not_found("Profile", user_id))?;

        debug!(user_id = %user_id, role = %profile.role, "Session resolved");
        Ok(Session::new(profile.id, profile.name, profile.role))
    }
}
