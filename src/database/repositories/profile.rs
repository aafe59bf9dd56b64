//! Profile repository implementation

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::database::store::ProfileStore;
use crate::models::profile::Profile;
use crate::utils::errors::{CampusError, Result};

#[derive(Debug, FromRow)]
struct ProfileRow {
    id: Uuid,
    name: String,
    role: String,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = CampusError;

    fn try_from(row: ProfileRow) -> Result<Self> {
        Ok(Profile {
            id: row.id,
            name: row.name,
            role: row.role.parse()?,
        })
    }
}

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>("SELECT id, name, role FROM profiles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Profile::try_from).transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles (id, name, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                role = EXCLUDED.role
            RETURNING id, name, role
            "#,
        )
        .bind(profile.id)
        .bind(&profile.name)
        .bind(profile.role.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }
}
