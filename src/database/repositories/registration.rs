//! Registration repository implementation

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::event::EventRow;
use crate::database::store::RegistrationStore;
use crate::models::registration::{Registration, RegistrationWithEvent};
use crate::utils::errors::{CampusError, ErrorKind, Result};
use crate::utils::logging::log_database_operation;

const REGISTRATION_COLUMNS: &str = "id, event_id, user_id, phone, created_at";

#[derive(Debug, FromRow)]
struct RegistrationEventRow {
    registration_id: Uuid,
    event_id: Uuid,
    user_id: Uuid,
    phone: String,
    registered_at: DateTime<Utc>,
    #[sqlx(flatten)]
    event: EventRow,
}

#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

impl RegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn guarded_insert(&self, registration: &Registration) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        // Locking the event row serialises concurrent registrations per event.
        let capacity: Option<(i32,)> =
            sqlx::query_as("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(registration.event_id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((capacity,)) = capacity else {
            return Err(CampusError::not_found("Event", registration.event_id));
        };

        let taken: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
            .bind(registration.event_id)
            .fetch_one(&mut *tx)
            .await?;
        if taken.0 >= i64::from(capacity) {
            return Err(CampusError::Capacity {
                event_id: registration.event_id,
                capacity,
            });
        }

        let inserted = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO registrations (id, event_id, user_id, phone, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(registration.id)
        .bind(registration.event_id)
        .bind(registration.user_id)
        .bind(&registration.phone)
        .bind(registration.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => CampusError::Duplicate {
                event_id: registration.event_id,
                user_id: registration.user_id,
            },
            other => other.into(),
        })?;

        tx.commit().await?;
        Ok(inserted)
    }
}

#[async_trait]
impl RegistrationStore for RegistrationRepository {
    async fn insert_within_capacity(&self, registration: &Registration) -> Result<Registration> {
        let started = Instant::now();
        let result = self.guarded_insert(registration).await;
        let storage_failed = matches!(result, Err(ref e) if e.kind() == ErrorKind::Constraint);
        log_database_operation(
            "insert_within_capacity",
            "registrations",
            started.elapsed().as_millis() as u64,
            !storage_failed,
        );
        result
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn find_for(&self, event_id: Uuid, user_id: Uuid) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = $1 AND user_id = $2"
        ))
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn count_for_event(&self, event_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE event_id = $1")
            .bind(event_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn count_all(&self) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn count_for_user(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM registrations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<RegistrationWithEvent>> {
        let rows = sqlx::query_as::<_, RegistrationEventRow>(
            r#"
            SELECT r.id AS registration_id, r.event_id, r.user_id, r.phone, r.created_at AS registered_at,
                   e.id, e.title, e.description, e.event_date, e.event_time, e.venue, e.category,
                   e.capacity, e.created_by, e.image_url, e.created_at, e.updated_at
            FROM registrations r
            INNER JOIN events e ON e.id = r.event_id
            WHERE r.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(RegistrationWithEvent {
                    registration: Registration {
                        id: row.registration_id,
                        event_id: row.event_id,
                        user_id: row.user_id,
                        phone: row.phone,
                        created_at: row.registered_at,
                    },
                    event: row.event.try_into()?,
                })
            })
            .collect()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CampusError::not_found("Registration", id));
        }

        Ok(())
    }
}
