//! Contribution ledger service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::ports::{ContributionLedger, ContributionsView};
use crate::domain::reporting::{contribution_summary, monthly_series};
use crate::domain::{
    Contribution, ContributionId, Error, FeatureArea, Member, MonthlyTotal, NewContribution,
    Period, RecordStore, Role, ScopeFilter, Session,
};

/// Contribution service backed by the record store.
pub struct ContributionService {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl ContributionService {
    /// Create the service.
    pub fn new(store: RecordStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    fn current_period(&self) -> (Period, i32) {
        let today = self.clock.local();
        let period = Period::from_month(today.month()).unwrap_or_default();
        (period, today.year())
    }

    async fn scoped(&self, session: &Session) -> Result<(Vec<Member>, Vec<Contribution>), Error> {
        let members: Vec<Member> = self.store.load().await?;
        let contributions: Vec<Contribution> = self.store.load().await?;
        let filter = ScopeFilter::for_session(session, &members);
        let members = filter.members(members);
        let contributions = filter.contributions(contributions, &members);
        Ok((members, contributions))
    }
}

#[async_trait]
impl ContributionLedger for ContributionService {
    async fn overview(&self, session: &Session) -> Result<ContributionsView, Error> {
        session.require(FeatureArea::Contributions)?;
        let (members, contributions) = self.scoped(session).await?;
        let summary = contribution_summary(
            session.role(),
            &contributions,
            &members,
            self.current_period(),
        );
        Ok(ContributionsView {
            members,
            contributions,
            summary,
        })
    }

    async fn record(
        &self,
        session: &Session,
        input: NewContribution,
    ) -> Result<Contribution, Error> {
        session.require(FeatureArea::Contributions)?;
        if session.role() == Role::Member {
            return Err(Error::forbidden("member sessions may not record contributions"));
        }
        let _guard = self.write_lock.lock().await;
        let members: Vec<Member> = self.store.load().await?;
        let mut contributions: Vec<Contribution> = self.store.load_for_update().await?;

        let filter = ScopeFilter::for_session(session, &members);
        if !members
            .iter()
            .any(|member| member.id == input.member_id && filter.admits_member(member))
        {
            return Err(Error::not_found(format!(
                "member {} not found",
                input.member_id
            )));
        }
        if contributions
            .iter()
            .any(|existing| existing.covers(&input.member_id, input.period, input.year))
        {
            return Err(Error::conflict(
                "contribution already recorded for this member and period",
            )
            .with_details(json!({ "code": "duplicate_contribution" })));
        }

        let contribution = Contribution {
            id: ContributionId::random(),
            member_id: input.member_id,
            amount: input.amount,
            payment_method: input.payment_method,
            period: input.period,
            year: input.year,
            recorded_by: session.username().to_owned(),
            recorded_at: self.clock.utc(),
        };
        contributions.push(contribution.clone());
        self.store.save(&contributions).await?;
        info!(
            contribution_id = %contribution.id,
            member_id = %contribution.member_id,
            amount = contribution.amount,
            "contribution recorded"
        );
        Ok(contribution)
    }

    async fn monthly(
        &self,
        session: &Session,
        year: Option<i32>,
    ) -> Result<Vec<MonthlyTotal>, Error> {
        session.require(FeatureArea::Contributions)?;
        let year = year.unwrap_or_else(|| self.clock.local().year());
        let (_, contributions) = self.scoped(session).await?;
        Ok(monthly_series(&contributions, Some(year)))
    }
}

#[cfg(test)]
#[path = "contribution_service_tests.rs"]
mod tests;
