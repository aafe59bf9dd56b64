//! Test data fixtures

use campus_events::models::{ContactInfo, CreateEventRequest, CreateVenueRequest, EventCategory};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// The instant every default test context considers "now"
pub fn noon() -> NaiveDateTime {
    day(0).and_time(time(12, 0))
}

/// Calendar day `offset` days from [`noon`]'s date
pub fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap() + Duration::days(offset)
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub fn event_request(title: &str, venue: &str, capacity: i32, date: NaiveDate) -> CreateEventRequest {
    CreateEventRequest {
        title: title.to_string(),
        description: format!("{} description", title),
        date,
        time: time(18, 0),
        venue: venue.to_string(),
        category: EventCategory::Workshop,
        capacity,
        image_url: None,
    }
}

pub fn venue_request(name: &str, capacity: i32) -> CreateVenueRequest {
    CreateVenueRequest {
        name: name.to_string(),
        address: "1 University Ave".to_string(),
        capacity,
    }
}

pub fn contact() -> ContactInfo {
    ContactInfo::phone("+1 555-010-0100")
}
