//! Venue repository implementation

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::store::VenueStore;
use crate::models::profile::Role;
use crate::models::venue::Venue;
use crate::utils::errors::{CampusError, Result};

const VENUE_COLUMNS: &str = "id, name, address, capacity, created_by, created_at";

fn name_taken(name: &str) -> impl FnOnce(sqlx::Error) -> CampusError + '_ {
    move |e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            CampusError::Validation(format!("A venue named '{}' already exists", name))
        }
        other => other.into(),
    }
}

#[derive(Clone)]
pub struct VenueRepository {
    pool: PgPool,
}

impl VenueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VenueStore for VenueRepository {
    async fn insert(&self, venue: &Venue) -> Result<Venue> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            r#"
            INSERT INTO venues (id, name, address, capacity, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(venue.capacity)
        .bind(venue.created_by)
        .bind(venue.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(name_taken(&venue.name))?;

        Ok(venue)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(venue)
    }

    async fn update(&self, venue: &Venue) -> Result<Venue> {
        let mut tx = self.pool.begin().await?;

        let previous: Option<(String,)> =
            sqlx::query_as("SELECT name FROM venues WHERE id = $1 FOR UPDATE")
                .bind(venue.id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_name,)) = previous else {
            return Err(CampusError::not_found("Venue", venue.id));
        };

        let updated = sqlx::query_as::<_, Venue>(&format!(
            r#"
            UPDATE venues
            SET name = $2,
                address = $3,
                capacity = $4
            WHERE id = $1
            RETURNING {VENUE_COLUMNS}
            "#
        ))
        .bind(venue.id)
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(venue.capacity)
        .fetch_one(&mut *tx)
        .await
        .map_err(name_taken(&venue.name))?;

        if previous_name != updated.name {
            let moved = sqlx::query("UPDATE events SET venue = $2, updated_at = $3 WHERE venue = $1")
                .bind(&previous_name)
                .bind(&updated.name)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await?;
            tracing::debug!(
                venue_id = %updated.id,
                from = %previous_name,
                to = %updated.name,
                events = moved.rows_affected(),
                "Re-pointed events to renamed venue"
            );
        }

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_unless_in_use(&self, id: Uuid) -> Result<Venue> {
        let mut tx = self.pool.begin().await?;

        let venue = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CampusError::not_found("Venue", id))?;

        // Events name venues by value, so hold off event writes until commit.
        sqlx::query("LOCK TABLE events IN SHARE MODE")
            .execute(&mut *tx)
            .await?;

        let (in_use,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM events WHERE venue = $1)")
                .bind(&venue.name)
                .fetch_one(&mut *tx)
                .await?;
        if in_use {
            return Err(CampusError::InUse { venue: venue.name });
        }

        sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venue)
    }

    async fn list(&self) -> Result<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(&format!(
            "SELECT {VENUE_COLUMNS} FROM venues ORDER BY name ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }

    async fn list_created_by_role(&self, role: Role) -> Result<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(
            r#"
            SELECT v.id, v.name, v.address, v.capacity, v.created_by, v.created_at
            FROM venues v
            INNER JOIN profiles p ON p.id = v.created_by
            WHERE p.role = $1
            ORDER BY v.name ASC
            "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(venues)
    }
}
