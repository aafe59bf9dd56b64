//! Session planning state
//!
//! A session-local scratch pad of venues, bookings and bookable resources.
//! Every change goes through [`reduce`], which consumes the old state and
//! returns the new one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedVenue {
    pub id: String,
    pub name: String,
    pub description: String,
    pub capacity: u32,
    pub image_url: String,
    /// Equipment names available in the room
    pub resources: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub venue_id: String,
    pub event_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
    pub created_by: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceStatus {
    Available,
    InUse,
    Maintenance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub venue_id: String,
    pub kind: String,
    pub status: ResourceStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningState {
    pub venues: Vec<PlannedVenue>,
    pub bookings: Vec<Booking>,
    pub resources: Vec<Resource>,
}

impl Default for PlanningState {
    /// Starts with the two sample rooms
    fn default() -> Self {
        Self {
            venues: vec![
                PlannedVenue {
                    id: "1".to_string(),
                    name: "Main Auditorium".to_string(),
                    description: "Large auditorium with stage and professional sound system"
                        .to_string(),
                    capacity: 500,
                    image_url: "https://images.unsplash.com/photo-1517457373958-b7bdd4587205?auto=format&fit=crop&q=80&w=1000".to_string(),
                    resources: ["Projector", "Sound System", "Stage Lighting", "Podium"]
                        .map(String::from)
                        .to_vec(),
                },
                PlannedVenue {
                    id: "2".to_string(),
                    name: "Conference Hall".to_string(),
                    description: "Modern conference space with flexible seating arrangement"
                        .to_string(),
                    capacity: 200,
                    image_url: "https://images.unsplash.com/photo-1431540015161-0bf868a2d407?auto=format&fit=crop&q=80&w=1000".to_string(),
                    resources: ["Video Conferencing", "Whiteboard", "Coffee Station"]
                        .map(String::from)
                        .to_vec(),
                },
            ],
            bookings: Vec::new(),
            resources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanningAction {
    AddVenue(PlannedVenue),
    UpdateVenue(PlannedVenue),
    DeleteVenue(String),
    AddBooking(Booking),
    UpdateBooking(Booking),
    DeleteBooking(String),
    AddResource(Resource),
    UpdateResource(Resource),
    DeleteResource(String),
}

trait Identified {
    fn id(&self) -> &str;
}

impl Identified for PlannedVenue {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Booking {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Resource {
    fn id(&self) -> &str {
        &self.id
    }
}

fn replace<T: Identified>(items: &mut [T], item: T) {
    if let Some(slot) = items.iter_mut().find(|existing| existing.id() == item.id()) {
        *slot = item;
    }
}

fn remove<T: Identified>(items: &mut Vec<T>, id: &str) {
    items.retain(|existing| existing.id() != id);
}

/// Apply `action` to `state`.
///
/// Updates and deletes that name an unknown id leave the state unchanged.
pub fn reduce(mut state: PlanningState, action: PlanningAction) -> PlanningState {
    match action {
        PlanningAction::AddVenue(venue) => state.venues.push(venue),
        PlanningAction::UpdateVenue(venue) => replace(&mut state.venues, venue),
        PlanningAction::DeleteVenue(id) => remove(&mut state.venues, &id),
        PlanningAction::AddBooking(booking) => state.bookings.push(booking),
        PlanningAction::UpdateBooking(booking) => replace(&mut state.bookings, booking),
        PlanningAction::DeleteBooking(id) => remove(&mut state.bookings, &id),
        PlanningAction::AddResource(resource) => state.resources.push(resource),
        PlanningAction::UpdateResource(resource) => replace(&mut state.resources, resource),
        PlanningAction::DeleteResource(id) => remove(&mut state.resources, &id),
    }
    state
}

/// Whether `venue_id` is free between `start` and `end`.
///
/// A live booking blocks the window when it contains the requested start
/// (`[start, end)`) or the requested end (`(start, end]`). Cancelled
/// bookings never block.
pub fn is_venue_available(
    bookings: &[Booking],
    venue_id: &str,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> bool {
    !bookings.iter().any(|booking| {
        booking.venue_id == venue_id
            && booking.status != BookingStatus::Cancelled
            && ((start >= booking.start_time && start < booking.end_time)
                || (end > booking.start_time && end <= booking.end_time))
    })
}

/// Bookings of `venue_id` lying entirely within `[from, to]`, any status
pub fn venue_bookings<'a>(
    bookings: &'a [Booking],
    venue_id: &str,
    from: NaiveDateTime,
    to: NaiveDateTime,
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|booking| {
            booking.venue_id == venue_id && booking.start_time >= from && booking.end_time <= to
        })
        .collect()
}
