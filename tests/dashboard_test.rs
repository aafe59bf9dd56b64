//! Dashboard statistics integration tests

mod helpers;

use assert_matches::assert_matches;
use campus_events::services::{AdminStats, DashboardStats, StudentStats, TeacherStats};
use helpers::*;

#[tokio::test]
async fn test_stats_per_role() {
    let ctx = TestContext::new();
    let admin = ctx.admin().await;
    let teacher = ctx.teacher().await;
    let alice = ctx.student("Alice").await;
    let bob = ctx.student("Bob").await;
    let catalog = &ctx.services.catalog;
    let ledger = &ctx.services.ledger;

    ctx.services.venues.create(venue_request("Hall", 100), &admin).await.unwrap();

    let admins_event = catalog
        .create(event_request("Welcome", "Hall", 50, day(2)), &admin)
        .await
        .unwrap();
    let past = catalog
        .create(event_request("Retro", "Hall", 50, day(-5)), &teacher)
        .await
        .unwrap();
    let upcoming = catalog
        .create(event_request("Future", "Hall", 50, day(5)), &teacher)
        .await
        .unwrap();

    ledger.register(admins_event.id, &alice, contact()).await.unwrap();
    ledger.register(past.id, &alice, contact()).await.unwrap();
    ledger.register(upcoming.id, &alice, contact()).await.unwrap();
    ledger.register(upcoming.id, &bob, contact()).await.unwrap();

    let dashboard = &ctx.services.dashboard;

    assert_eq!(
        dashboard.admin_stats(&admin).await.unwrap(),
        AdminStats {
            total_events: 3,
            total_registrations: 4,
            active_events: 2,
            total_venues: 1,
            my_events: 1,
            my_event_registrations: 1,
        }
    );

    assert_matches!(
        dashboard.for_session(&teacher).await.unwrap(),
        DashboardStats::Teacher(TeacherStats {
            total_events: 2,
            total_registrations: 3,
        })
    );

    assert_matches!(
        dashboard.for_session(&alice).await.unwrap(),
        DashboardStats::Student(StudentStats {
            total_registrations: 3,
            upcoming_events: 2,
        })
    );
}

#[tokio::test]
async fn test_empty_dashboards() {
    let ctx = TestContext::new();
    let student = ctx.student("Alice").await;

    let stats = ctx.services.dashboard.student_stats(&student).await.unwrap();
    assert_eq!(stats.total_registrations, 0);
    assert_eq!(stats.upcoming_events, 0);
}

#[tokio::test]
async fn test_student_total_counts_orphaned_registrations() {
    let ctx = TestContext::new();
    let teacher = ctx.teacher().await;
    let alice = ctx.student("Alice").await;
    let catalog = &ctx.services.catalog;
    let ledger = &ctx.services.ledger;

    let kept = catalog
        .create(event_request("Kept", "Hall", 10, day(2)), &teacher)
        .await
        .unwrap();
    let dropped = catalog
        .create(event_request("Dropped", "Hall", 10, day(3)), &teacher)
        .await
        .unwrap();
    ledger.register(kept.id, &alice, contact()).await.unwrap();
    ledger.register(dropped.id, &alice, contact()).await.unwrap();

    catalog.delete(dropped.id, &teacher).await.unwrap();

    let stats = ctx.services.dashboard.student_stats(&alice).await.unwrap();
    assert_eq!(
        stats,
        StudentStats {
            total_registrations: 2,
            upcoming_events: 1,
        }
    );
}
