//! In-memory storage
//!
//! Implements every storage trait over a single set of tables guarded by one
//! async mutex. Each trait call takes the lock once, so compound operations
//! such as the capacity-checked insert are atomic with respect to each other.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::database::store::{
    EventOrder, EventQuery, EventStore, ProfileStore, RegistrationStore, VenueStore,
};
use crate::models::{
    CreatorSummary, Event, EventWithCount, Profile, Registration, RegistrationWithEvent, Role,
    Venue,
};
use crate::utils::errors::{CampusError, Result};

#[derive(Debug, Default)]
struct Tables {
    events: HashMap<Uuid, Event>,
    venues: HashMap<Uuid, Venue>,
    registrations: HashMap<Uuid, Registration>,
    profiles: HashMap<Uuid, Profile>,
}

impl Tables {
    fn registrations_for(&self, event_id: Uuid) -> i64 {
        self.registrations
            .values()
            .filter(|registration| registration.event_id == event_id)
            .count() as i64
    }

    fn creator_of(&self, event: &Event) -> Option<CreatorSummary> {
        self.profiles
            .get(&event.created_by)
            .map(|profile| CreatorSummary {
                name: profile.name.clone(),
                role: profile.role,
            })
    }

    fn venue_name_taken(&self, name: &str, except: Option<Uuid>) -> bool {
        self.venues
            .values()
            .any(|venue| venue.name == name && Some(venue.id) != except)
    }
}

/// Storage that lives for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert(&self, event: &Event) -> Result<Event> {
        let mut tables = self.tables.lock().await;
        if tables.events.contains_key(&event.id) {
            return Err(CampusError::Constraint(format!("Duplicate event id {}", event.id)));
        }
        tables.events.insert(event.id, event.clone());
        Ok(event.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        Ok(self.tables.lock().await.events.get(&id).cloned())
    }

    async fn update(&self, event: &Event) -> Result<Event> {
        let mut tables = self.tables.lock().await;
        let slot = tables
            .events
            .get_mut(&event.id)
            .ok_or_else(|| CampusError::not_found("Event", event.id))?;
        *slot = event.clone();
        Ok(event.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.tables
            .lock()
            .await
            .events
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CampusError::not_found("Event", id))
    }

    async fn list(&self, query: &EventQuery) -> Result<Vec<EventWithCount>> {
        let tables = self.tables.lock().await;
        let mut events: Vec<EventWithCount> = tables
            .events
            .values()
            .filter(|event| query.id.map_or(true, |id| event.id == id))
            .filter(|event| query.from_date.map_or(true, |from| event.date >= from))
            .filter(|event| query.created_by.map_or(true, |creator| event.created_by == creator))
            .map(|event| EventWithCount {
                event: event.clone(),
                registrations_count: tables.registrations_for(event.id),
                creator: tables.creator_of(event),
            })
            .collect();

        match query.order {
            EventOrder::Schedule => events.sort_by_key(|e| (e.event.date, e.event.time)),
            EventOrder::NewestCreated => {
                events.sort_by(|a, b| b.event.created_at.cmp(&a.event.created_at))
            }
        }

        if let Some(limit) = query.limit {
            events.truncate(limit);
        }

        Ok(events)
    }
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn insert_within_capacity(&self, registration: &Registration) -> Result<Registration> {
        let mut tables = self.tables.lock().await;

        let capacity = tables
            .events
            .get(&registration.event_id)
            .map(|event| event.capacity)
            .ok_or_else(|| CampusError::not_found("Event", registration.event_id))?;

        let duplicate = tables.registrations.values().any(|existing| {
            existing.event_id == registration.event_id && existing.user_id == registration.user_id
        });
        if duplicate {
            return Err(CampusError::Duplicate {
                event_id: registration.event_id,
                user_id: registration.user_id,
            });
        }

        if tables.registrations_for(registration.event_id) >= i64::from(capacity) {
            return Err(CampusError::Capacity {
                event_id: registration.event_id,
                capacity,
            });
        }

        tables
            .registrations
            .insert(registration.id, registration.clone());
        Ok(registration.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>> {
        Ok(self.tables.lock().await.registrations.get(&id).cloned())
    }

    async fn find_for(&self, event_id: Uuid, user_id: Uuid) -> Result<Option<Registration>> {
        Ok(self
            .tables
            .lock()
            .await
            .registrations
            .values()
            .find(|r| r.event_id == event_id && r.user_id == user_id)
            .cloned())
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        Ok(self.tables.lock().await.registrations_for(event_id))
    }

    async fn count_all(&self) -> Result<i64> {
        Ok(self.tables.lock().await.registrations.len() as i64)
    }

    async fn count_for_user(&self, user_id: Uuid) -> Result<i64> {
        Ok(self
            .tables
            .lock()
            .await
            .registrations
            .values()
            .filter(|registration| registration.user_id == user_id)
            .count() as i64)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<RegistrationWithEvent>> {
        let tables = self.tables.lock().await;
        let mut rows: Vec<RegistrationWithEvent> = tables
            .registrations
            .values()
            .filter(|registration| registration.user_id == user_id)
            .filter_map(|registration| {
                tables
                    .events
                    .get(&registration.event_id)
                    .map(|event| RegistrationWithEvent {
                        registration: registration.clone(),
                        event: event.clone(),
                    })
            })
            .collect();

        rows.sort_by(|a, b| b.registration.created_at.cmp(&a.registration.created_at));
        Ok(rows)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.tables
            .lock()
            .await
            .registrations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| CampusError::not_found("Registration", id))
    }
}

#[async_trait]
impl VenueStore for MemoryStore {
    async fn insert(&self, venue: &Venue) -> Result<Venue> {
        let mut tables = self.tables.lock().await;
        if tables.venue_name_taken(&venue.name, None) {
            return Err(CampusError::Validation(format!(
                "A venue named '{}' already exists",
                venue.name
            )));
        }
        tables.venues.insert(venue.id, venue.clone());
        Ok(venue.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>> {
        Ok(self.tables.lock().await.venues.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Venue>> {
        Ok(self
            .tables
            .lock()
            .await
            .venues
            .values()
            .find(|venue| venue.name == name)
            .cloned())
    }

    async fn update(&self, venue: &Venue) -> Result<Venue> {
        let mut tables = self.tables.lock().await;
        let previous_name = tables
            .venues
            .get(&venue.id)
            .map(|existing| existing.name.clone())
            .ok_or_else(|| CampusError::not_found("Venue", venue.id))?;

        if tables.venue_name_taken(&venue.name, Some(venue.id)) {
            return Err(CampusError::Validation(format!(
                "A venue named '{}' already exists",
                venue.name
            )));
        }

        if previous_name != venue.name {
            let now = chrono::Utc::now();
            for event in tables.events.values_mut().filter(|e| e.venue == previous_name) {
                event.venue = venue.name.clone();
                event.updated_at = now;
            }
        }

        tables.venues.insert(venue.id, venue.clone());
        Ok(venue.clone())
    }

    async fn delete_unless_in_use(&self, id: Uuid) -> Result<Venue> {
        let mut tables = self.tables.lock().await;
        let name = tables
            .venues
            .get(&id)
            .map(|venue| venue.name.clone())
            .ok_or_else(|| CampusError::not_found("Venue", id))?;

        if tables.events.values().any(|event| event.venue == name) {
            return Err(CampusError::InUse { venue: name });
        }

        tables
            .venues
            .remove(&id)
            .ok_or_else(|| CampusError::not_found("Venue", id))
    }

    async fn list(&self) -> Result<Vec<Venue>> {
        let mut venues: Vec<Venue> = self.tables.lock().await.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(venues)
    }

    async fn list_created_by_role(&self, role: Role) -> Result<Vec<Venue>> {
        let tables = self.tables.lock().await;
        let mut venues: Vec<Venue> = tables
            .venues
            .values()
            .filter(|venue| {
                tables
                    .profiles
                    .get(&venue.created_by)
                    .is_some_and(|profile| profile.role == role)
            })
            .cloned()
            .collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(venues)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        Ok(self.tables.lock().await.profiles.get(&id).cloned())
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile> {
        self.tables
            .lock()
            .await
            .profiles
            .insert(profile.id, profile.clone());
        Ok(profile.clone())
    }
}
