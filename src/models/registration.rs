//! Registration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::event::Event;

/// One seat claimed by one user for one event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Contact details collected by the registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
}

impl ContactInfo {
    pub fn phone(phone: impl Into<String>) -> Self {
        Self { phone: phone.into() }
    }
}

/// A registration joined with the event it points at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWithEvent {
    #[serde(flatten)]
    pub registration: Registration,
    pub event: Event,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationFilter {
    #[default]
    All,
    /// Events that have not started yet
    Upcoming,
    /// Events whose start lies before now
    Past,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationSort {
    /// Newest registration first
    #[default]
    RegisteredAt,
    /// Earliest event first
    EventDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationQuery {
    #[serde(default)]
    pub filter: RegistrationFilter,
    #[serde(default)]
    pub sort: RegistrationSort,
}
