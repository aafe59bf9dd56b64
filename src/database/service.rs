//! Database service layer
//!
//! Bundles one handle per table behind the storage traits so the services
//! never see which backend they run on.

use std::sync::Arc;

use crate::database::memory::MemoryStore;
use crate::database::repositories::{
    EventRepository, ProfileRepository, RegistrationRepository, VenueRepository,
};
use crate::database::store::{EventStore, ProfileStore, RegistrationStore, VenueStore};
use crate::database::DatabasePool;

#[derive(Clone)]
pub struct DatabaseService {
    pub events: Arc<dyn EventStore>,
    pub registrations: Arc<dyn RegistrationStore>,
    pub venues: Arc<dyn VenueStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl DatabaseService {
    /// PostgreSQL-backed storage
    pub fn postgres(pool: DatabasePool) -> Self {
        Self {
            events: Arc::new(EventRepository::new(pool.clone())),
            registrations: Arc::new(RegistrationRepository::new(pool.clone())),
            venues: Arc::new(VenueRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool)),
        }
    }

    /// Process-local storage; every handle shares the same tables
    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            events: Arc::new(store.clone()),
            registrations: Arc::new(store.clone()),
            venues: Arc::new(store.clone()),
            profiles: Arc::new(store),
        }
    }
}

impl std::fmt::Debug for DatabaseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Profile, Role};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_in_memory_handles_share_tables() {
        let service = DatabaseService::in_memory();
        let profile = Profile {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            role: Role::Admin,
        };
        service.profiles.upsert(&profile).await.unwrap();

        let found = service.profiles.find_by_id(profile.id).await.unwrap();
        assert_eq!(found, Some(profile));
        assert_eq!(service.registrations.count_all().await.unwrap(), 0);
    }
}
