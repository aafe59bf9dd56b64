//! Event model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::profile::Role;
use crate::services::availability::{self, EventStatus};
use crate::utils::errors::CampusError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Venue name; events reference venues by value
    pub venue: String,
    pub category: EventCategory,
    pub capacity: i32,
    pub created_by: Uuid,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn starts_at(&self) -> NaiveDateTime {
        availability::event_start(self.date, self.time)
    }

    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        availability::is_past(self.date, self.time, now)
    }

    pub fn status(&self, now: NaiveDateTime) -> EventStatus {
        availability::event_status(self.date, self.time, now)
    }
}

/// An event joined with the number of ledger rows that reference it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventWithCount {
    #[serde(flatten)]
    pub event: Event,
    pub registrations_count: i64,
    /// Name and role of the creator; `None` when the profile is gone
    #[serde(default)]
    pub creator: Option<CreatorSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorSummary {
    pub name: String,
    pub role: Role,
}

impl EventWithCount {
    pub fn seats_remaining(&self) -> i64 {
        availability::seats_remaining(self.event.capacity, self.registrations_count)
    }

    pub fn is_full(&self) -> bool {
        availability::is_full(self.event.capacity, self.registrations_count)
    }

    pub fn status(&self, now: NaiveDateTime) -> EventStatus {
        self.event.status(now)
    }
}

/// Fixed set of event categories offered by the catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "Coding Contest")]
    CodingContest,
    #[serde(rename = "Hackathon")]
    Hackathon,
    #[serde(rename = "Robotics")]
    Robotics,
    #[default]
    #[serde(rename = "Workshop")]
    Workshop,
    #[serde(rename = "Seminar")]
    Seminar,
    #[serde(rename = "Tech Talk")]
    TechTalk,
    #[serde(rename = "Research Seminar")]
    ResearchSeminar,
    #[serde(rename = "Cultural Fest")]
    CulturalFest,
    #[serde(rename = "Sports Meet")]
    SportsMeet,
}

impl EventCategory {
    pub const ALL: [EventCategory; 9] = [
        EventCategory::CodingContest,
        EventCategory::Hackathon,
        EventCategory::Robotics,
        EventCategory::Workshop,
        EventCategory::Seminar,
        EventCategory::TechTalk,
        EventCategory::ResearchSeminar,
        EventCategory::CulturalFest,
        EventCategory::SportsMeet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::CodingContest => "Coding Contest",
            EventCategory::Hackathon => "Hackathon",
            EventCategory::Robotics => "Robotics",
            EventCategory::Workshop => "Workshop",
            EventCategory::Seminar => "Seminar",
            EventCategory::TechTalk => "Tech Talk",
            EventCategory::ResearchSeminar => "Research Seminar",
            EventCategory::CulturalFest => "Cultural Fest",
            EventCategory::SportsMeet => "Sports Meet",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = CampusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventCategory::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CampusError::Validation(format!("Unknown event category: {}", s)))
    }
}

/// Ordering offered by the catalog page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventSort {
    /// Earliest start first
    #[default]
    Date,
    /// Alphabetical, ignoring case
    Title,
}

/// Catalog page filter: category, free-text search and ordering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventFilter {
    /// `None` keeps every category
    pub category: Option<EventCategory>,
    /// Case-insensitive match against title or description
    pub search: Option<String>,
    pub sort: EventSort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue: String,
    #[serde(default)]
    pub category: EventCategory,
    pub capacity: i32,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue: Option<String>,
    pub category: Option<EventCategory>,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub image: ImageUpdate,
}

/// What an update does to the event's image reference.
///
/// Replacing or removing an image drops the old reference only; the stored
/// object is left in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "url")]
pub enum ImageUpdate {
    #[default]
    Keep,
    Replace(String),
    Remove,
}
