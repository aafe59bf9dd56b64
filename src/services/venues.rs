//! Venue registry
//!
//! Events point at venues by name, so a venue can only be deleted once no
//! event names it.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::store::VenueStore;
use crate::models::{CreateVenueRequest, Role, UpdateVenueRequest, Venue};
use crate::services::auth::{Permission, Session};
use crate::utils::errors::{CampusError, Result};
use crate::utils::helpers::{require_capacity, require_text};
use crate::utils::logging::log_venue_action;

#[derive(Clone)]
pub struct VenueRegistry {
    venues: Arc<dyn VenueStore>,
}

impl VenueRegistry {
    pub fn new(venues: Arc<dyn VenueStore>) -> Self {
        Self { venues }
    }

    pub async fn list(&self) -> Result<Vec<Venue>> {
        self.venues.list().await
    }

    /// Venues created by admins, offered when picking an event's venue
    pub async fn list_admin_venues(&self) -> Result<Vec<Venue>> {
        self.venues.list_created_by_role(Role::Admin).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Venue> {
        self.venues
            .find_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Venue", id))
    }

    pub async fn create(&self, request: CreateVenueRequest, session: &Session) -> Result<Venue> {
        debug!(admin_id = %session.user_id, name = %request.name, "Creating venue");
        session.require(Permission::ManageVenues)?;

        let venue = Venue {
            id: Uuid::new_v4(),
            name: require_text("Venue name", &request.name)?,
            address: require_text("Address", &request.address)?,
            capacity: require_capacity("Capacity", request.capacity)?,
            created_by: session.user_id,
            created_at: Utc::now(),
        };

        let venue = self.venues.insert(&venue).await?;
        log_venue_action(venue.id, "create", session.user_id, Some(&venue.name));
        Ok(venue)
    }

    /// Apply `patch`. Renaming carries every event at the old name along.
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateVenueRequest,
        session: &Session,
    ) -> Result<Venue> {
        debug!(venue_id = %id, admin_id = %session.user_id, "Updating venue");
        session.require(Permission::ManageVenues)?;

        let mut venue = self.get(id).await?;
        if let Some(name) = patch.name {
            venue.name = require_text("Venue name", &name)?;
        }
        if let Some(address) = patch.address {
            venue.address = require_text("Address", &address)?;
        }
        if let Some(capacity) = patch.capacity {
            venue.capacity = require_capacity("Capacity", capacity)?;
        }

        let venue = self.venues.update(&venue).await?;
        log_venue_action(venue.id, "update", session.user_id, Some(&venue.name));
        Ok(venue)
    }

    /// Delete the venue unless an event names it. The store makes the check
    /// and the delete one step, so no event can claim the name in between.
    pub async fn delete(&self, id: Uuid, session: &Session) -> Result<()> {
        debug!(venue_id = %id, admin_id = %session.user_id, "Deleting venue");
        session.require(Permission::ManageVenues)?;

        match self.venues.delete_unless_in_use(id).await {
            Ok(venue) => {
                log_venue_action(id, "delete", session.user_id, Some(&venue.name));
                Ok(())
            }
            Err(CampusError::InUse { venue }) => {
                warn!(venue_id = %id, venue = %venue, "Venue still referenced by events");
                Err(CampusError::InUse { venue })
            }
            Err(e) => Err(e),
        }
    }
}
