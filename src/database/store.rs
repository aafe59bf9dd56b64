//! Storage collaborator contracts
//!
//! One repository trait per table. The PostgreSQL repositories and the
//! in-memory store both implement every trait, so services depend only on
//! these seams.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{Event, EventWithCount, Profile, Registration, RegistrationWithEvent, Role, Venue};
use crate::utils::errors::Result;

/// Row ordering for event listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventOrder {
    /// `(date, time)` ascending
    #[default]
    Schedule,
    /// Newest created first
    NewestCreated,
}

/// Filter, order and cap for event listings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    /// Only the event with this id
    pub id: Option<Uuid>,
    /// Only events dated on or after this day
    pub from_date: Option<NaiveDate>,
    pub created_by: Option<Uuid>,
    pub order: EventOrder,
    pub limit: Option<usize>,
}

#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert(&self, event: &Event) -> Result<Event>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Replace every mutable column. Fails with `NotFound` if the row is gone.
    async fn update(&self, event: &Event) -> Result<Event>;

    /// Fails with `NotFound` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Events matching `query`, each joined with its registration count and
    /// its creator's profile
    async fn list(&self, query: &EventQuery) -> Result<Vec<EventWithCount>>;
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Insert `registration` if the event exists, the pair is new and a seat
    /// is free, all checked atomically with the insert.
    ///
    /// Fails with `NotFound`, `Duplicate` or `Capacity` respectively.
    async fn insert_within_capacity(&self, registration: &Registration) -> Result<Registration>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>>;

    async fn find_for(&self, event_id: Uuid, user_id: Uuid) -> Result<Option<Registration>>;

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64>;

    async fn count_all(&self) -> Result<i64>;

    /// Every ledger row of `user_id`, orphans included
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64>;

    /// Registrations of `user_id` whose event still exists, newest first
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<RegistrationWithEvent>>;

    /// Fails with `NotFound` if nothing was deleted.
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait VenueStore: Send + Sync {
    /// Fails with `Validation` if the name is taken.
    async fn insert(&self, venue: &Venue) -> Result<Venue>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Venue>>;

    /// Replace the venue row. A changed name is carried over to every event
    /// that referenced the old one within the same operation.
    async fn update(&self, venue: &Venue) -> Result<Venue>;

    /// Delete the venue unless an event names it, checked atomically with the
    /// delete so no event can start referencing it in between.
    ///
    /// Fails with `NotFound` or `InUse`; returns the deleted row.
    async fn delete_unless_in_use(&self, id: Uuid) -> Result<Venue>;

    /// All venues ordered by name
    async fn list(&self) -> Result<Vec<Venue>>;

    /// Venues whose creator holds `role`, ordered by name
    async fn list_created_by_role(&self, role: Role) -> Result<Vec<Venue>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    async fn upsert(&self, profile: &Profile) -> Result<Profile>;
}
