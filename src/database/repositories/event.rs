//! Event repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::database::store::{EventOrder, EventQuery, EventStore};
use crate::models::event::{CreatorSummary, Event, EventWithCount};
use crate::utils::errors::{CampusError, Result};

const EVENT_COLUMNS: &str = "id, title, description, event_date, event_time, venue, category, capacity, created_by, image_url, created_at, updated_at";

/// Raw `events` row; the category column is free text in the database
#[derive(Debug, FromRow)]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub venue: String,
    pub category: String,
    pub capacity: i32,
    pub created_by: Uuid,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = CampusError;

    fn try_from(row: EventRow) -> Result<Self> {
        Ok(Event {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.event_date,
            time: row.event_time,
            venue: row.venue,
            category: row.category.parse()?,
            capacity: row.capacity,
            created_by: row.created_by,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct EventCountRow {
    #[sqlx(flatten)]
    event: EventRow,
    registrations_count: i64,
    creator_name: Option<String>,
    creator_role: Option<String>,
}

impl TryFrom<EventCountRow> for EventWithCount {
    type Error = CampusError;

    fn try_from(row: EventCountRow) -> Result<Self> {
        let creator = match (row.creator_name, row.creator_role) {
            (Some(name), Some(role)) => Some(CreatorSummary {
                name,
                role: role.parse()?,
            }),
            _ => None,
        };

        Ok(EventWithCount {
            event: row.event.try_into()?,
            registrations_count: row.registrations_count,
            creator,
        })
    }
}

#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn insert(&self, event: &Event) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            INSERT INTO events (id, title, description, event_date, event_time, venue, category, capacity, created_by, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.time)
        .bind(&event.venue)
        .bind(event.category.as_str())
        .bind(event.capacity)
        .bind(event.created_by)
        .bind(&event.image_url)
        .bind(event.created_at)
        .bind(event.updated_at)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Event::try_from).transpose()
    }

    async fn update(&self, event: &Event) -> Result<Event> {
        let row = sqlx::query_as::<_, EventRow>(&format!(
            r#"
            UPDATE events
            SET title = $2,
                description = $3,
                event_date = $4,
                event_time = $5,
                venue = $6,
                category = $7,
                capacity = $8,
                image_url = $9,
                updated_at = $10
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.date)
        .bind(event.time)
        .bind(&event.venue)
        .bind(event.category.as_str())
        .bind(event.capacity)
        .bind(&event.image_url)
        .bind(event.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| CampusError::not_found("Event", event.id))?
            .try_into()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CampusError::not_found("Event", id));
        }

        Ok(())
    }

    async fn list(&self, query: &EventQuery) -> Result<Vec<EventWithCount>> {
        let mut builder = QueryBuilder::<Postgres>::new(
            r#"
            SELECT e.id, e.title, e.description, e.event_date, e.event_time, e.venue, e.category,
                   e.capacity, e.created_by, e.image_url, e.created_at, e.updated_at,
                   COUNT(r.id) AS registrations_count,
                   p.name AS creator_name, p.role AS creator_role
            FROM events e
            LEFT JOIN registrations r ON r.event_id = e.id
            LEFT JOIN profiles p ON p.id = e.created_by
            WHERE TRUE
            "#,
        );

        if let Some(id) = query.id {
            builder.push(" AND e.id = ").push_bind(id);
        }
        if let Some(from_date) = query.from_date {
            builder.push(" AND e.event_date >= ").push_bind(from_date);
        }
        if let Some(created_by) = query.created_by {
            builder.push(" AND e.created_by = ").push_bind(created_by);
        }

        builder.push(" GROUP BY e.id, p.name, p.role");
        builder.push(match query.order {
            EventOrder::Schedule => " ORDER BY e.event_date ASC, e.event_time ASC",
            EventOrder::NewestCreated => " ORDER BY e.created_at DESC",
        });

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder
            .build_query_as::<EventCountRow>()
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EventWithCount::try_from).collect()
    }
}
