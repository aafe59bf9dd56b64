//! Event catalog service
//!
//! Owns event records. Listings are always joined with the live registration
//! count so availability can be derived without a second query.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::database::store::{EventOrder, EventQuery, EventStore};
use crate::models::{
    CreateEventRequest, Event, EventCategory, EventFilter, EventSort, EventWithCount, ImageUpdate,
    UpdateEventRequest,
};
use crate::services::auth::{Permission, Session};
use crate::utils::clock::Clock;
use crate::utils::errors::{CampusError, Result};
use crate::utils::helpers::{require_capacity, require_text};
use crate::utils::logging::log_event_action;

#[derive(Clone)]
pub struct EventCatalog {
    events: Arc<dyn EventStore>,
    clock: Arc<dyn Clock>,
    config: CatalogConfig,
}

impl EventCatalog {
    pub fn new(
        events: Arc<dyn EventStore>,
        clock: Arc<dyn Clock>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            events,
            clock,
            config,
        }
    }

    /// Events dated today or later in schedule order.
    ///
    /// Falls back to the configured default cap when `limit` is `None`.
    pub async fn list_upcoming(&self, limit: Option<usize>) -> Result<Vec<EventWithCount>> {
        let query = EventQuery {
            from_date: Some(self.clock.today()),
            order: EventOrder::Schedule,
            limit: limit.or(self.config.default_upcoming_limit),
            ..Default::default()
        };
        debug!(from_date = ?query.from_date, limit = ?query.limit, "Listing upcoming events");
        self.events.list(&query).await
    }

    /// Every event, newest created first
    pub async fn list_all(&self) -> Result<Vec<EventWithCount>> {
        self.events
            .list(&EventQuery {
                order: EventOrder::NewestCreated,
                ..Default::default()
            })
            .await
    }

    /// Events created by `user_id` in schedule order
    pub async fn list_by_creator(&self, user_id: Uuid) -> Result<Vec<EventWithCount>> {
        self.events
            .list(&EventQuery {
                created_by: Some(user_id),
                ..Default::default()
            })
            .await
    }

    /// One event with its registration count and creator
    pub async fn get(&self, id: Uuid) -> Result<EventWithCount> {
        self.events
            .list(&EventQuery {
                id: Some(id),
                ..Default::default()
            })
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| CampusError::not_found("Event", id))
    }

    pub async fn create(&self, request: CreateEventRequest, session: &Session) -> Result<Event> {
        debug!(user_id = %session.user_id, title = %request.title, "Creating event");
        session.require(Permission::ManageEvents)?;

        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            title: require_text("Title", &request.title)?,
            description: require_text("Description", &request.description)?,
            date: request.date,
            time: request.time,
            venue: require_text("Venue", &request.venue)?,
            category: request.category,
            capacity: require_capacity("Capacity", request.capacity)?,
            created_by: session.user_id,
            image_url: non_blank(request.image_url),
            created_at: now,
            updated_at: now,
        };

        let event = self.events.insert(&event).await?;
        log_event_action(event.id, "create", session.user_id, Some(&event.title));
        Ok(event)
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateEventRequest,
        session: &Session,
    ) -> Result<Event> {
        debug!(event_id = %id, user_id = %session.user_id, "Updating event");
        session.require(Permission::ManageEvents)?;

        let mut event = self.find(id).await?;
        session.require_event_owner(&event)?;

        if let Some(title) = patch.title {
            event.title = require_text("Title", &title)?;
        }
        if let Some(description) = patch.description {
            event.description = require_text("Description", &description)?;
        }
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(time) = patch.time {
            event.time = time;
        }
        if let Some(venue) = patch.venue {
            event.venue = require_text("Venue", &venue)?;
        }
        if let Some(category) = patch.category {
            event.category = category;
        }
        if let Some(capacity) = patch.capacity {
            event.capacity = require_capacity("Capacity", capacity)?;
        }
        match patch.image {
            ImageUpdate::Keep => {}
            ImageUpdate::Replace(url) => {
                event.image_url = Some(require_text("Image URL", &url)?);
            }
            ImageUpdate::Remove => event.image_url = None,
        }
        event.updated_at = Utc::now();

        let event = self.events.update(&event).await?;
        log_event_action(event.id, "update", session.user_id, None);
        Ok(event)
    }

    /// Remove the event. Its registrations stay in the ledger.
    pub async fn delete(&self, id: Uuid, session: &Session) -> Result<()> {
        debug!(event_id = %id, user_id = %session.user_id, "Deleting event");
        session.require(Permission::ManageEvents)?;

        let event = self.find(id).await?;
        session.require_event_owner(&event)?;

        self.events.delete(id).await?;
        log_event_action(id, "delete", session.user_id, Some(&event.title));
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Event> {
        self.events
            .find_by_id(id)
            .await?
            .ok_or_else(|| CampusError::not_found("Event", id))
    }
}

/// Keep only events in `category`; `None` keeps everything
pub fn filter_by_category(
    events: Vec<EventWithCount>,
    category: Option<EventCategory>,
) -> Vec<EventWithCount> {
    match category {
        None => events,
        Some(category) => events
            .into_iter()
            .filter(|e| e.event.category == category)
            .collect(),
    }
}

/// Apply the catalog page's filter: category, then text search, then sort
pub fn apply_filter(events: Vec<EventWithCount>, filter: &EventFilter) -> Vec<EventWithCount> {
    let mut events = filter_by_category(events, filter.category);

    if let Some(needle) = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
    {
        events.retain(|e| {
            e.event.title.to_lowercase().contains(&needle)
                || e.event.description.to_lowercase().contains(&needle)
        });
    }

    match filter.sort {
        EventSort::Date => events.sort_by_key(|e| e.event.starts_at()),
        EventSort::Title => events.sort_by_cached_key(|e| e.event.title.to_lowercase()),
    }

    events
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::Role;
    use crate::utils::clock::FixedClock;
    use chrono::{NaiveDate, NaiveTime};

    fn catalog() -> EventCatalog {
        let store = MemoryStore::new();
        let clock = FixedClock::at(
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        );
        EventCatalog::new(
            Arc::new(store),
            Arc::new(clock),
            CatalogConfig::default(),
        )
    }

    fn request(day: u32) -> CreateEventRequest {
        CreateEventRequest {
            title: "Hack Night".to_string(),
            description: "Build something".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            venue: "Main Hall".to_string(),
            category: EventCategory::Hackathon,
            capacity: 30,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_validates_fields() {
        let catalog = catalog();
        let teacher = Session::new(Uuid::new_v4(), "Tom", Role::Teacher);

        let mut blank = request(5);
        blank.title = "   ".to_string();
        assert!(matches!(catalog.create(blank, &teacher).await, Err(CampusError::Validation(_))));

        let mut zero = request(5);
        zero.capacity = 0;
        assert!(matches!(catalog.create(zero, &teacher).await, Err(CampusError::Validation(_))));

        let event = catalog.create(request(5), &teacher).await.unwrap();
        assert_eq!(event.created_by, teacher.user_id);
    }

    #[tokio::test]
    async fn test_students_cannot_create() {
        let catalog = catalog();
        let student = Session::new(Uuid::new_v4(), "Sam", Role::Student);
        let result = catalog.create(request(5), &student).await;
        assert!(matches!(result, Err(CampusError::Authorization(_))));
    }

    #[tokio::test]
    async fn test_image_replace_and_remove() {
        let catalog = catalog();
        let teacher = Session::new(Uuid::new_v4(), "Tom", Role::Teacher);
        let mut with_image = request(5);
        with_image.image_url = Some("event-images/a.png".to_string());
        let event = catalog.create(with_image, &teacher).await.unwrap();

        let replaced = catalog
            .update(
                event.id,
                UpdateEventRequest {
                    image: ImageUpdate::Replace("event-images/b.png".to_string()),
                    ..Default::default()
                },
                &teacher,
            )
            .await
            .unwrap();
        assert_eq!(replaced.image_url.as_deref(), Some("event-images/b.png"));

        let removed = catalog
            .update(
                event.id,
                UpdateEventRequest {
                    image: ImageUpdate::Remove,
                    ..Default::default()
                },
                &teacher,
            )
            .await
            .unwrap();
        assert_eq!(removed.image_url, None);
    }

    #[tokio::test]
    async fn test_list_upcoming_skips_past_days() {
        let catalog = catalog();
        let teacher = Session::new(Uuid::new_v4(), "Tom", Role::Teacher);
        let mut old = request(1);
        old.date = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();
        catalog.create(old, &teacher).await.unwrap();
        catalog.create(request(3), &teacher).await.unwrap();
        catalog.create(request(1), &teacher).await.unwrap();

        let upcoming = catalog.list_upcoming(None).await.unwrap();
        let days: Vec<u32> = upcoming.iter().map(|e| chrono::Datelike::day(&e.event.date)).collect();
        assert_eq!(days, vec![1, 3]);
    }

    fn listed(title: &str, description: &str, category: EventCategory, day: u32) -> EventWithCount {
        let now = Utc::now();
        EventWithCount {
            event: Event {
                id: Uuid::new_v4(),
                title: title.to_string(),
                description: description.to_string(),
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                venue: "Main Hall".to_string(),
                category,
                capacity: 10,
                created_by: Uuid::new_v4(),
                image_url: None,
                created_at: now,
                updated_at: now,
            },
            registrations_count: 0,
            creator: None,
        }
    }

    fn titles(events: &[EventWithCount]) -> Vec<&str> {
        events.iter().map(|e| e.event.title.as_str()).collect()
    }

    #[test]
    fn test_filter_by_category() {
        let events = vec![
            listed("Bot Brawl", "Arena", EventCategory::Robotics, 2),
            listed("Poetry", "Open mic", EventCategory::CulturalFest, 3),
        ];

        assert_eq!(filter_by_category(events.clone(), None).len(), 2);
        let robotics = filter_by_category(events, Some(EventCategory::Robotics));
        assert_eq!(titles(&robotics), ["Bot Brawl"]);
    }

    #[test]
    fn test_apply_filter_searches_title_and_description() {
        let events = vec![
            listed("Rust Workshop", "Ownership basics", EventCategory::Workshop, 9),
            listed("Intro Night", "Meet the RUST club", EventCategory::Seminar, 4),
            listed("Chess", "Blitz games", EventCategory::SportsMeet, 1),
        ];

        let filter = EventFilter {
            search: Some("  rust ".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filter(events.clone(), &filter)), ["Intro Night", "Rust Workshop"]);

        let filter = EventFilter {
            search: Some("rust".to_string()),
            category: Some(EventCategory::Workshop),
            ..Default::default()
        };
        assert_eq!(titles(&apply_filter(events.clone(), &filter)), ["Rust Workshop"]);

        let blank = EventFilter {
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(apply_filter(events, &blank).len(), 3);
    }

    #[test]
    fn test_apply_filter_sorts_by_title_ignoring_case() {
        let events = vec![
            listed("beta", "", EventCategory::Workshop, 1),
            listed("Alpha", "", EventCategory::Workshop, 2),
            listed("Gamma", "", EventCategory::Workshop, 3),
        ];

        let by_title = EventFilter {
            sort: EventSort::Title,
            ..Default::default()
        };
        assert_eq!(titles(&apply_filter(events.clone(), &by_title)), ["Alpha", "beta", "Gamma"]);
        assert_eq!(
            titles(&apply_filter(events, &EventFilter::default())),
            ["beta", "Alpha", "Gamma"]
        );
    }
}
