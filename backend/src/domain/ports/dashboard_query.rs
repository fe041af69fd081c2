//! Driving port for the overview dashboard.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ContributionActivity, DashboardStats, DistributionBucket, Error, MonthlyTotal, Session,
    SyndicatePerformance,
};

/// Everything the overview page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Headline figures.
    pub stats: DashboardStats,
    /// Per-month totals across all years.
    pub monthly: Vec<MonthlyTotal>,
    /// Members per education level.
    pub education: Vec<DistributionBucket>,
    /// Contributions per payment method.
    pub payment_methods: Vec<DistributionBucket>,
    /// Per-syndicate totals; empty unless the caller is an admin.
    pub syndicate_performance: Vec<SyndicatePerformance>,
    /// Latest contributions.
    pub recent_activity: Vec<ContributionActivity>,
}

/// Read-only dashboard port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Build the report visible to `session`.
    async fn report(&self, session: &Session) -> Result<DashboardReport, Error>;
}
