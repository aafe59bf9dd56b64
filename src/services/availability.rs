//! Availability calculations
//!
//! Pure functions over already-fetched catalog and ledger data. Status is
//! never stored; it is recomputed from the schedule and the current time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Completed,
    Today,
    Upcoming,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Completed => "Completed",
            EventStatus::Today => "Today",
            EventStatus::Upcoming => "Upcoming",
        }
    }
}

pub fn event_start(date: NaiveDate, time: NaiveTime) -> NaiveDateTime {
    date.and_time(time)
}

/// Seats left, clamped at zero.
///
/// The count can exceed capacity when capacity is lowered after people have
/// registered.
pub fn seats_remaining(capacity: i32, registrations_count: i64) -> i64 {
    (i64::from(capacity) - registrations_count).max(0)
}

pub fn is_full(capacity: i32, registrations_count: i64) -> bool {
    registrations_count >= i64::from(capacity)
}

/// True once the event's start lies strictly before `now`
pub fn is_past(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> bool {
    event_start(date, time) < now
}

pub fn event_status(date: NaiveDate, time: NaiveTime, now: NaiveDateTime) -> EventStatus {
    if is_past(date, time, now) {
        EventStatus::Completed
    } else if date == now.date() {
        EventStatus::Today
    } else {
        EventStatus::Upcoming
    }
}
