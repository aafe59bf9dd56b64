//! Dashboard statistics
//!
//! Aggregates shown on the admin, teacher and student landing pages.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::database::store::{EventQuery, EventStore, RegistrationStore, VenueStore};
use crate::services::auth::{DashboardKind, Session};
use crate::utils::clock::Clock;
use crate::utils::errors::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_events: usize,
    pub total_registrations: i64,
    /// Events dated today or later
    pub active_events: usize,
    pub total_venues: usize,
    pub my_events: usize,
    pub my_event_registrations: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherStats {
    pub total_events: usize,
    pub total_registrations: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStats {
    /// Every ledger row of the student, including rows whose event is gone
    pub total_registrations: i64,
    /// Registrations for events dated today or later
    pub upcoming_events: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DashboardStats {
    Admin(AdminStats),
    Teacher(TeacherStats),
    Student(StudentStats),
}

#[derive(Clone)]
pub struct DashboardService {
    events: Arc<dyn EventStore>,
    registrations: Arc<dyn RegistrationStore>,
    venues: Arc<dyn VenueStore>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(
        events: Arc<dyn EventStore>,
        registrations: Arc<dyn RegistrationStore>,
        venues: Arc<dyn VenueStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            events,
            registrations,
            venues,
            clock,
        }
    }

    /// Statistics for whichever dashboard the session's role sees
    pub async fn for_session(&self, session: &Session) -> Result<DashboardStats> {
        debug!(user_id = %session.user_id, role = %session.role, "Loading dashboard stats");
        Ok(match session.dashboard_kind() {
            DashboardKind::Admin => DashboardStats::Admin(self.admin_stats(session).await?),
            DashboardKind::Teacher => DashboardStats::Teacher(self.teacher_stats(session).await?),
            DashboardKind::Student => DashboardStats::Student(self.student_stats(session).await?),
        })
    }

    pub async fn admin_stats(&self, session: &Session) -> Result<AdminStats> {
        let today = self.clock.today();
        let query = EventQuery::default();
        let (events, total_registrations, venues) = futures::try_join!(
            self.events.list(&query),
            self.registrations.count_all(),
            self.venues.list(),
        )?;
        let mine: Vec<_> = events
            .iter()
            .filter(|e| e.event.created_by == session.user_id)
            .collect();

        Ok(AdminStats {
            total_events: events.len(),
            total_registrations,
            active_events: events.iter().filter(|e| e.event.date >= today).count(),
            total_venues: venues.len(),
            my_events: mine.len(),
            my_event_registrations: mine.iter().map(|e| e.registrations_count).sum(),
        })
    }

    pub async fn teacher_stats(&self, session: &Session) -> Result<TeacherStats> {
        let own = self
            .events
            .list(&EventQuery {
                created_by: Some(session.user_id),
                ..Default::default()
            })
            .await?;

        Ok(TeacherStats {
            total_events: own.len(),
            total_registrations: own.iter().map(|e| e.registrations_count).sum(),
        })
    }

    pub async fn student_stats(&self, session: &Session) -> Result<StudentStats> {
        let today = self.clock.today();
        let (total_registrations, registrations) = futures::try_join!(
            self.registrations.count_for_user(session.user_id),
            self.registrations.list_for_user(session.user_id),
        )?;

        Ok(StudentStats {
            total_registrations,
            upcoming_events: registrations
                .iter()
                .filter(|r| r.event.date >= today)
                .count(),
        })
    }
}
