//! Registration ledger
//!
//! The set of (event, user) seat claims. A claim is only added while the
//! pair is new and the event has a free seat; the storage layer re-checks
//! both inside the insert so concurrent sessions cannot oversell.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::store::{EventStore, RegistrationStore};
use crate::models::{
    ContactInfo, Registration, RegistrationFilter, RegistrationQuery, RegistrationSort,
    RegistrationWithEvent,
};
use crate::services::auth::Session;
use crate::utils::clock::Clock;
use crate::utils::errors::{CampusError, Result};
use crate::utils::helpers::{format_event_start, is_valid_phone, require_text};
use crate::utils::logging::{log_registration_action, log_registration_rejected};

#[derive(Clone)]
pub struct RegistrationLedger {
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    clock: Arc<dyn Clock>,
}

impl RegistrationLedger {
    pub fn new(
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            registrations,
            clock,
        }
    }

    /// Claim a seat on `event_id` for the session's user.
    ///
    /// Checks run in order: the event exists, the contact phone is valid, the
    /// user holds no seat yet, a seat is free.
    pub async fn register(
        &self,
        event_id: Uuid,
        session: &Session,
        contact: ContactInfo,
    ) -> Result<Registration> {
        let user_id = session.user_id;
        debug!(event_id = %event_id, user_id = %user_id, "Registering for event");

        let event = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| CampusError::not_found("Event", event_id))?;

        let phone = require_text("Phone number", &contact.phone)?;
        if !is_valid_phone(&phone) {
            return Err(CampusError::Validation(format!("Invalid phone number: {}", phone)));
        }

        if self.registrations.find_for(event_id, user_id).await?.is_some() {
            log_registration_rejected(event_id, user_id, "already registered");
            return Err(CampusError::Duplicate { event_id, user_id });
        }

        let count = self.registrations.count_for_event(event_id).await?;
        if count >= i64::from(event.capacity) {
            log_registration_rejected(event_id, user_id, "event is full");
            return Err(CampusError::Capacity {
                event_id,
                capacity: event.capacity,
            });
        }

        let registration = Registration {
            id: Uuid::new_v4(),
            event_id,
            user_id,
            phone,
            created_at: Utc::now(),
        };

        let registration = self
            .registrations
            .insert_within_capacity(&registration)
            .await
            .inspect_err(|e| log_registration_rejected(event_id, user_id, &e.to_string()))?;

        log_registration_action(event_id, user_id, "register", Some(&event.title));
        Ok(registration)
    }

    /// Withdraw a registration the session's user owns.
    ///
    /// Refused once the event has started. A registration whose event was
    /// deleted can always be withdrawn.
    pub async fn cancel(&self, registration_id: Uuid, session: &Session) -> Result<()> {
        debug!(registration_id = %registration_id, user_id = %session.user_id, "Cancelling registration");

        let registration = self
            .registrations
            .find_by_id(registration_id)
            .await?
            .ok_or_else(|| CampusError::not_found("Registration", registration_id))?;

        if registration.user_id != session.user_id {
            return Err(CampusError::Authorization(
                "Only the registrant may cancel this registration".to_string(),
            ));
        }

        match self.events.find_by_id(registration.event_id).await? {
            Some(event) if event.is_past(self.clock.now()) => {
                log_registration_rejected(event.id, session.user_id, "event already started");
                return Err(CampusError::Temporal(format!(
                    "Cannot cancel registration for an event that started {}",
                    format_event_start(event.date, event.time)
                )));
            }
            Some(_) => {}
            None => {
                info!(registration_id = %registration_id, "Cancelling registration for deleted event");
            }
        }

        self.registrations.delete(registration_id).await?;
        log_registration_action(registration.event_id, session.user_id, "cancel", None);
        Ok(())
    }

    pub async fn count_for(&self, event_id: Uuid) -> Result<i64> {
        self.registrations.count_for_event(event_id).await
    }

    pub async fn is_registered(&self, event_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.registrations.find_for(event_id, user_id).await?.is_some())
    }

    /// Registrations of `user_id` with their events, filtered and sorted per
    /// `query`. Registrations whose event no longer exists are left out.
    pub async fn list_for(
        &self,
        user_id: Uuid,
        query: RegistrationQuery,
    ) -> Result<Vec<RegistrationWithEvent>> {
        let now = self.clock.now();
        let mut rows = self.registrations.list_for_user(user_id).await?;

        rows.retain(|row| match query.filter {
            RegistrationFilter::All => true,
            RegistrationFilter::Upcoming => !row.event.is_past(now),
            RegistrationFilter::Past => row.event.is_past(now),
        });

        match query.sort {
            RegistrationSort::RegisteredAt => {
                rows.sort_by(|a, b| b.registration.created_at.cmp(&a.registration.created_at))
            }
            RegistrationSort::EventDate => rows.sort_by_key(|row| row.event.starts_at()),
        }

        debug!(user_id = %user_id, count = rows.len(), "Listed registrations");
        Ok(rows)
    }
}
