//! Venue registry integration tests

mod helpers;

use assert_matches::assert_matches;
use campus_events::models::{UpdateEventRequest, UpdateVenueRequest};
use campus_events::CampusError;
use helpers::*;
use uuid::Uuid;

#[tokio::test]
async fn test_lab_one_scenario() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    let lab = venues.create(venue_request("Lab 1", 40), &admin).await.unwrap();
    let event = ctx
        .services
        .catalog
        .create(event_request("Robotics Demo", "Lab 1", 20, day(5)), &admin)
        .await
        .unwrap();

    let blocked = venues.delete(lab.id, &admin).await;
    assert_matches!(blocked, Err(CampusError::InUse { ref venue }) if venue == "Lab 1");
    assert!(venues.get(lab.id).await.is_ok());

    ctx.services.catalog.delete(event.id, &admin).await.unwrap();
    venues.delete(lab.id, &admin).await.unwrap();
    assert_matches!(venues.get(lab.id).await, Err(CampusError::NotFound { .. }));
}

#[tokio::test]
async fn test_moving_event_elsewhere_frees_venue() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    let lab = venues.create(venue_request("Lab 2", 40), &admin).await.unwrap();
    let event = ctx
        .services
        .catalog
        .create(event_request("Soldering", "Lab 2", 10, day(5)), &admin)
        .await
        .unwrap();

    ctx.services
        .catalog
        .update(
            event.id,
            UpdateEventRequest {
                venue: Some("Workshop Barn".to_string()),
                ..Default::default()
            },
            &admin,
        )
        .await
        .unwrap();

    venues.delete(lab.id, &admin).await.unwrap();
}

#[tokio::test]
async fn test_rename_keeps_events_attached() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    let hall = venues.create(venue_request("Main Hall", 300), &admin).await.unwrap();
    let event = ctx
        .services
        .catalog
        .create(event_request("Convocation", "Main Hall", 250, day(7)), &admin)
        .await
        .unwrap();

    let renamed = venues
        .update(
            hall.id,
            UpdateVenueRequest {
                name: Some("Founders Hall".to_string()),
                ..Default::default()
            },
            &admin,
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Founders Hall");

    let event = ctx.services.catalog.get(event.id).await.unwrap();
    assert_eq!(event.event.venue, "Founders Hall");

    assert_matches!(
        venues.delete(hall.id, &admin).await,
        Err(CampusError::InUse { .. })
    );
}

#[tokio::test]
async fn test_create_validates_and_requires_admin() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let teacher = ctx.teacher().await;
    let venues = &ctx.services.venues;

    assert_matches!(
        venues.create(venue_request("Studio", 20), &teacher).await,
        Err(CampusError::Authorization(_))
    );
    assert_matches!(
        venues.create(venue_request("  ", 20), &admin).await,
        Err(CampusError::Validation(_))
    );
    assert_matches!(
        venues.create(venue_request("Studio", 0), &admin).await,
        Err(CampusError::Validation(_))
    );

    venues.create(venue_request("Studio", 20), &admin).await.unwrap();
    assert_matches!(
        venues.create(venue_request("Studio", 30), &admin).await,
        Err(CampusError::Validation(_))
    );
}

#[tokio::test]
async fn test_update_rejects_taken_name() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    venues.create(venue_request("Room A", 20), &admin).await.unwrap();
    let b = venues.create(venue_request("Room B", 20), &admin).await.unwrap();

    let result = venues
        .update(
            b.id,
            UpdateVenueRequest {
                name: Some("Room A".to_string()),
                ..Default::default()
            },
            &admin,
        )
        .await;
    assert_matches!(result, Err(CampusError::Validation(_)));
    assert_eq!(venues.get(b.id).await.unwrap().name, "Room B");
}

#[tokio::test]
async fn test_listings_are_sorted_and_admin_filtered() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    venues.create(venue_request("Gym", 100), &admin).await.unwrap();
    venues.create(venue_request("Auditorium", 400), &admin).await.unwrap();

    let names: Vec<_> = venues.list().await.unwrap().into_iter().map(|v| v.name).collect();
    assert_eq!(names, ["Auditorium", "Gym"]);
    assert_eq!(venues.list_admin_venues().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_unknown_venue_is_not_found() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let venues = &ctx.services.venues;

    assert_matches!(
        venues.delete(Uuid::new_v4(), &admin).await,
        Err(CampusError::NotFound { entity: "Venue", .. })
    );
    assert_matches!(
        venues.get(Uuid::new_v4()).await,
        Err(CampusError::NotFound { entity: "Venue", .. })
    );
}

#[tokio::test]
async fn test_delete_requires_admin() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let teacher = ctx.teacher().await;
    let venues = &ctx.services.venues;

    let lab = venues.create(venue_request("Lab 3", 40), &admin).await.unwrap();
    assert_matches!(
        venues.delete(lab.id, &teacher).await,
        Err(CampusError::Authorization(_))
    );
    assert!(venues.get(lab.id).await.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_delete_racing_event_creation_stays_consistent() {
    for round in 0..20 {
        let ctx = TestContext::new();
        let admin = ctx.admin().await;
        let name = format!("Lab {}", round);
        let lab = ctx
            .services
            .venues
            .create(venue_request(&name, 40), &admin)
            .await
            .unwrap();

        let creators: Vec<_> = (0..4)
            .map(|i| {
                let catalog = ctx.services.catalog.clone();
                let admin = admin.clone();
                let request = event_request(&format!("Session {}", i), &name, 10, day(1));
                tokio::spawn(async move { catalog.create(request, &admin).await })
            })
            .collect();
        let deleter = {
            let venues = ctx.services.venues.clone();
            let admin = admin.clone();
            let id = lab.id;
            tokio::spawn(async move { venues.delete(id, &admin).await })
        };

        for creator in futures::future::join_all(creators).await {
            creator.unwrap().unwrap();
        }

        match deleter.await.unwrap() {
            Ok(()) => assert_matches!(
                ctx.services.venues.get(lab.id).await,
                Err(CampusError::NotFound { .. })
            ),
            Err(CampusError::InUse { venue }) => {
                assert_eq!(venue, name);
                assert!(ctx.services.venues.get(lab.id).await.is_ok());
            }
            Err(e) => panic!("unexpected error: {}", e),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_deletes_of_used_venue_all_refused() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let lab = ctx
        .services
        .venues
        .create(venue_request("Lab 9", 40), &admin)
        .await
        .unwrap();
    ctx.services
        .catalog
        .create(event_request("Open Lab", "Lab 9", 10, day(1)), &admin)
        .await
        .unwrap();

    let deletes: Vec<_> = (0..8)
        .map(|_| {
            let venues = ctx.services.venues.clone();
            let admin = admin.clone();
            let id = lab.id;
            tokio::spawn(async move { venues.delete(id, &admin).await })
        })
        .collect();

    for result in futures::future::join_all(deletes).await {
        assert_matches!(result.unwrap(), Err(CampusError::InUse { .. }));
    }
    assert!(ctx.services.venues.get(lab.id).await.is_ok());
}
