//! Overview dashboard service.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{DashboardQuery, DashboardReport};
use crate::domain::reporting::{
    dashboard_stats, education_distribution, monthly_series, payment_method_distribution,
    recent_activity, syndicate_performance,
};
use crate::domain::{Error, FeatureArea, RecordStore, Role, Session};

/// Read-only service computing the overview from scoped records.
pub struct DashboardService {
    store: RecordStore,
}

impl DashboardService {
    /// Create the service.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DashboardQuery for DashboardService {
    async fn report(&self, session: &Session) -> Result<DashboardReport, Error> {
        session.require(FeatureArea::Overview)?;
        let everything = self.store.snapshot().await?;
        let all_syndicates = everything.syndicates.clone();
        let scoped = everything.scoped(session);
        let role = session.role();

        let stats = dashboard_stats(
            role,
            &all_syndicates,
            &scoped.members,
            &scoped.contributions,
            scoped.trainings.len(),
        );
        let performance = if role == Role::Admin {
            syndicate_performance(&scoped.syndicates, &scoped.members, &scoped.contributions)
        } else {
            Vec::new()
        };
        debug!(
            session_id = session.id(),
            members = stats.total_members,
            contributions = scoped.contributions.len(),
            "dashboard report built"
        );
        Ok(DashboardReport {
            stats,
            monthly: monthly_series(&scoped.contributions, None),
            education: education_distribution(&scoped.members),
            payment_methods: payment_method_distribution(&scoped.contributions),
            syndicate_performance: performance,
            recent_activity: recent_activity(&scoped.contributions, &scoped.members),
        })
    }
}
