//! Test context for unified test setup
//!
//! Wires every service to one in-memory store and a fixed clock, and hands
//! out sessions for freshly created profiles.

use std::sync::Arc;

use campus_events::config::Settings;
use campus_events::database::{DatabaseService, MemoryStore, ProfileStore};
use campus_events::models::{Profile, Role};
use campus_events::services::{ServiceFactory, Session};
use campus_events::FixedClock;
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::test_data::noon;

pub struct TestContext {
    pub services: ServiceFactory,
    pub store: MemoryStore,
    pub settings: Settings,
    pub now: NaiveDateTime,
}

impl TestContext {
    /// Context whose clock reads [`noon`]
    pub fn new() -> Self {
        Self::at(noon())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        let store = MemoryStore::new();
        let settings = Settings::default();
        let services = ServiceFactory::new(
            &settings,
            DatabaseService::from_memory(store.clone()),
            Arc::new(FixedClock::new(now)),
        );

        Self {
            services,
            store,
            settings,
            now,
        }
    }

    /// Create a profile with `role` and resolve its session
    pub async fn session(&self, name: &str, role: Role) -> Session {
        let profile = Profile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            role,
        };
        self.store
            .upsert(&profile)
            .await
            .expect("Failed to store profile");

        self.services
            .auth_service
            .resolve_session(profile.id)
            .await
            .expect("Failed to resolve session")
    }

    pub async fn admin(&self) -> Session {
        self.session("Ada Admin", Role::Admin).await
    }

    pub async fn teacher(&self) -> Session {
        self.session("Tomas Teacher", Role::Teacher).await
    }

    pub async fn student(&self, name: &str) -> Session {
        self.session(name, Role::Student).await
    }
}
