//! Campus Events
//!
//! Main application entry point

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};

use campus_events::{
    config::Settings,
    database::{create_pool, run_migrations, DatabaseService},
    services::ServiceFactory,
    utils::{helpers::format_event_start, logging},
    SystemClock,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("failed to load settings")?;
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", campus_events::info());

    info!("Connecting to database...");
    let pool = create_pool(&settings.database)
        .await
        .context("failed to connect to database")?;

    if settings.database.run_migrations {
        run_migrations(&pool).await?;
    }

    let services = ServiceFactory::new(
        &settings,
        DatabaseService::postgres(pool),
        Arc::new(SystemClock),
    );

    let health = services.health_check().await;
    if !health.is_healthy() {
        for issue in health.get_issues() {
            error!("{}", issue);
        }
        anyhow::bail!("service health check failed");
    }

    let upcoming = services.catalog.list_upcoming(None).await?;
    info!(count = upcoming.len(), "Upcoming events");
    for entry in &upcoming {
        info!(
            event_id = %entry.event.id,
            starts = %format_event_start(entry.event.date, entry.event.time),
            venue = %entry.event.venue,
            registered = entry.registrations_count,
            seats_remaining = entry.seats_remaining(),
            "{}",
            entry.event.title
        );
    }

    Ok(())
}
