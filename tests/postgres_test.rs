//! PostgreSQL storage tests
//!
//! Need Docker (or `TEST_DATABASE_URL`); run with `cargo test -- --ignored`.

mod helpers;

use std::sync::Arc;

use assert_matches::assert_matches;
use campus_events::config::Settings;
use campus_events::database::{DatabaseService, ProfileStore};
use campus_events::models::{CreatorSummary, Profile, Role, UpdateVenueRequest};
use campus_events::services::{ServiceFactory, Session};
use campus_events::{CampusError, FixedClock};
use helpers::*;
use serial_test::serial;
use uuid::Uuid;

async fn setup() -> (TestDatabase, ServiceFactory) {
    let db = TestDatabase::new().await.expect("Failed to start test database");
    db.cleanup().await.expect("Failed to clean database");

    let services = ServiceFactory::new(
        &Settings::default(),
        DatabaseService::postgres(db.pool.clone()),
        Arc::new(FixedClock::new(noon())),
    );
    (db, services)
}

async fn session(services: &ServiceFactory, db: &TestDatabase, name: &str, role: Role) -> Session {
    let profile = Profile {
        id: Uuid::new_v4(),
        name: name.to_string(),
        role,
    };
    DatabaseService::postgres(db.pool.clone())
        .profiles
        .upsert(&profile)
        .await
        .expect("Failed to store profile");
    services.auth_service.resolve_session(profile.id).await.unwrap()
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_postgres_capacity_and_duplicates() {
    let (db, services) = setup().await;
    let teacher = session(&services, &db, "Tomas", Role::Teacher).await;

    let event = services
        .catalog
        .create(event_request("Main Hall Night", "Main Hall", 2, day(3)), &teacher)
        .await
        .unwrap();

    let a = session(&services, &db, "A", Role::Student).await;
    let b = session(&services, &db, "B", Role::Student).await;
    let c = session(&services, &db, "C", Role::Student).await;

    services.ledger.register(event.id, &a, contact()).await.unwrap();
    assert_matches!(
        services.ledger.register(event.id, &a, contact()).await,
        Err(CampusError::Duplicate { .. })
    );
    services.ledger.register(event.id, &b, contact()).await.unwrap();
    assert_matches!(
        services.ledger.register(event.id, &c, contact()).await,
        Err(CampusError::Capacity { .. })
    );

    let listed = services.catalog.get(event.id).await.unwrap();
    assert_eq!(listed.registrations_count, 2);
    assert_eq!(
        listed.creator,
        Some(CreatorSummary {
            name: "Tomas".to_string(),
            role: Role::Teacher,
        })
    );
    assert_matches!(
        services.catalog.get(Uuid::new_v4()).await,
        Err(CampusError::NotFound { .. })
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
#[ignore]
async fn test_postgres_concurrent_registrations() {
    let (db, services) = setup().await;
    let teacher = session(&services, &db, "Tomas", Role::Teacher).await;
    let event = services
        .catalog
        .create(event_request("Limited", "Main Hall", 3, day(3)), &teacher)
        .await
        .unwrap();

    let mut students = Vec::new();
    for i in 0..12 {
        students.push(session(&services, &db, &format!("S{}", i), Role::Student).await);
    }

    let attempts = students.into_iter().map(|student| {
        let ledger = services.ledger.clone();
        tokio::spawn(async move { ledger.register(event.id, &student, contact()).await })
    });
    let accepted = futures::future::join_all(attempts)
        .await
        .into_iter()
        .filter(|r| matches!(r, Ok(Ok(_))))
        .count();

    assert_eq!(accepted, 3);
    assert_eq!(services.ledger.count_for(event.id).await.unwrap(), 3);
}

#[tokio::test]
#[serial]
#[ignore]
async fn test_postgres_venue_rename_and_in_use() {
    let (db, services) = setup().await;
    let admin = session(&services, &db, "Ada", Role::Admin).await;

    let lab = services.venues.create(venue_request("Lab 1", 30), &admin).await.unwrap();
    let event = services
        .catalog
        .create(event_request("Demo", "Lab 1", 10, day(2)), &admin)
        .await
        .unwrap();

    services
        .venues
        .update(
            lab.id,
            UpdateVenueRequest {
                name: Some("Lab One".to_string()),
                ..Default::default()
            },
            &admin,
        )
        .await
        .unwrap();
    assert_eq!(services.catalog.get(event.id).await.unwrap().event.venue, "Lab One");

    assert_matches!(
        services.venues.delete(lab.id, &admin).await,
        Err(CampusError::InUse { .. })
    );
    services.catalog.delete(event.id, &admin).await.unwrap();
    services.venues.delete(lab.id, &admin).await.unwrap();
    assert_eq!(services.venues.list_admin_venues().await.unwrap().len(), 0);
    assert_matches!(
        services.venues.delete(lab.id, &admin).await,
        Err(CampusError::NotFound { .. })
    );
}
