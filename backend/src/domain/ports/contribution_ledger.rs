//! Driving port for recording and reviewing contributions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Contribution, ContributionSummary, Error, Member, MonthlyTotal, NewContribution, Session,
};

/// Scoped contribution view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsView {
    /// Visible members; a member session sees only its own record.
    pub members: Vec<Member>,
    /// Visible contributions in stored order.
    pub contributions: Vec<Contribution>,
    /// Summary figures.
    pub summary: ContributionSummary,
}

/// Contribution operations; every role may read, admins and leaders record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContributionLedger: Send + Sync {
    /// Visible contributions with summary figures.
    async fn overview(&self, session: &Session) -> Result<ContributionsView, Error>;

    /// Record a contribution for a visible member.
    async fn record(&self, session: &Session, input: NewContribution)
    -> Result<Contribution, Error>;

    /// Monthly series of visible contributions for `year`, defaulting to the
    /// current year.
    async fn monthly(
        &self,
        session: &Session,
        year: Option<i32>,
    ) -> Result<Vec<MonthlyTotal>, Error>;
}
