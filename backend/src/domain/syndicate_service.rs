//! Syndicate administration service.
//!
//! Implements [`SyndicateDirectory`]. Every operation is restricted to
//! administrators. Writes replace the whole syndicate collection under a
//! service-wide lock.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::identity::{IdentityLock, username_in_use};
use crate::domain::ports::{
    CredentialGenerator, SyndicateDetails, SyndicateDirectory, SyndicateOverview,
    UNASSIGNED_LEADER, issue_unique,
};
use crate::domain::{
    CredentialKind, Credentials, Error, FeatureArea, LeaderAssignment, LeaderSource, Member,
    MemberId, NewSyndicate, RecordStore, Session, Syndicate, SyndicateId, SyndicateUpdate,
};

fn overview(syndicate: Syndicate, members: &[Member]) -> SyndicateOverview {
    let leader_name = syndicate
        .leader_id
        .as_ref()
        .and_then(|leader| members.iter().find(|member| &member.id == leader))
        .map_or_else(|| UNASSIGNED_LEADER.to_owned(), |member| member.name().to_owned());
    let live_member_count = members
        .iter()
        .filter(|member| member.syndicate_id == syndicate.id)
        .count();
    SyndicateOverview {
        syndicate,
        leader_name,
        live_member_count,
    }
}

fn syndicate_not_found(id: &SyndicateId) -> Error {
    Error::not_found(format!("syndicate {id} not found"))
}

fn member_not_found(id: &MemberId) -> Error {
    Error::not_found(format!("member {id} not found"))
}

/// Syndicate service backed by the record store.
pub struct SyndicateService {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    credentials: Arc<dyn CredentialGenerator>,
    identity_lock: IdentityLock,
}

impl SyndicateService {
    /// Create the service.
    pub fn new(
        store: RecordStore,
        clock: Arc<dyn Clock>,
        credentials: Arc<dyn CredentialGenerator>,
        identity_lock: IdentityLock,
    ) -> Self {
        Self {
            store,
            clock,
            credentials,
            identity_lock,
        }
    }

    fn issue_leader_credentials(
        &self,
        syndicates: &[Syndicate],
        members: &[Member],
    ) -> Result<Credentials, Error> {
        issue_unique(self.credentials.as_ref(), CredentialKind::Leader, |username| {
            username_in_use(username, syndicates, members)
        })
        .ok_or_else(|| Error::internal("could not issue unique leader credentials"))
    }
}

#[async_trait]
impl SyndicateDirectory for SyndicateService {
    async fn list(&self, session: &Session) -> Result<Vec<SyndicateOverview>, Error> {
        session.require(FeatureArea::Syndicates)?;
        let syndicates: Vec<Syndicate> = self.store.load().await?;
        let members: Vec<Member> = self.store.load().await?;
        Ok(syndicates
            .into_iter()
            .map(|syndicate| overview(syndicate, &members))
            .collect())
    }

    async fn create(&self, session: &Session, input: NewSyndicate) -> Result<Syndicate, Error> {
        session.require(FeatureArea::Syndicates)?;
        let _guard = self.identity_lock.acquire().await;
        let mut syndicates: Vec<Syndicate> = self.store.load_for_update().await?;
        let members: Vec<Member> = self.store.load_for_update().await?;

        let (leader_id, leader_credentials) = match input.leader() {
            LeaderSource::Explicit(credentials) => (None, credentials.clone()),
            LeaderSource::FromMember(member_id) => {
                if !members.iter().any(|member| &member.id == member_id) {
                    return Err(member_not_found(member_id));
                }
                let issued = self.issue_leader_credentials(&syndicates, &members)?;
                (Some(member_id.clone()), issued)
            }
        };

        let syndicate = Syndicate {
            id: SyndicateId::random(),
            name: input.name().to_owned(),
            leader_id,
            leader_credentials,
            created_at: self.clock.utc(),
            member_count: 0,
        };
        syndicates.push(syndicate.clone());
        self.store.save(&syndicates).await?;
        info!(syndicate_id = %syndicate.id, name = %syndicate.name, "syndicate created");
        Ok(syndicate)
    }

    async fn assign_leader(
        &self,
        session: &Session,
        assignment: LeaderAssignment,
    ) -> Result<Syndicate, Error> {
        session.require(FeatureArea::Syndicates)?;
        let _guard = self.identity_lock.acquire().await;
        let mut syndicates: Vec<Syndicate> = self.store.load_for_update().await?;
        let members: Vec<Member> = self.store.load_for_update().await?;

        if !members
            .iter()
            .any(|member| member.id == assignment.member_id)
        {
            return Err(member_not_found(&assignment.member_id));
        }
        let issued = self.issue_leader_credentials(&syndicates, &members)?;
        let syndicate = syndicates
            .iter_mut()
            .find(|syndicate| syndicate.id == assignment.syndicate_id)
            .ok_or_else(|| syndicate_not_found(&assignment.syndicate_id))?;
        syndicate.leader_id = Some(assignment.member_id.clone());
        syndicate.leader_credentials = issued;
        let updated = syndicate.clone();

        self.store.save(&syndicates).await?;
        info!(
            syndicate_id = %updated.id,
            member_id = %assignment.member_id,
            "syndicate leader assigned"
        );
        Ok(updated)
    }

    async fn update(
        &self,
        session: &Session,
        id: &SyndicateId,
        update: SyndicateUpdate,
    ) -> Result<Syndicate, Error> {
        session.require(FeatureArea::Syndicates)?;
        let _guard = self.identity_lock.acquire().await;
        let mut syndicates: Vec<Syndicate> = self.store.load_for_update().await?;

        let syndicate = syndicates
            .iter_mut()
            .find(|syndicate| &syndicate.id == id)
            .ok_or_else(|| syndicate_not_found(id))?;
        update.apply_to(syndicate);
        let updated = syndicate.clone();

        self.store.save(&syndicates).await?;
        info!(syndicate_id = %updated.id, "syndicate updated");
        Ok(updated)
    }

    async fn details(
        &self,
        session: &Session,
        id: &SyndicateId,
    ) -> Result<SyndicateDetails, Error> {
        session.require(FeatureArea::Syndicates)?;
        let syndicates: Vec<Syndicate> = self.store.load().await?;
        let members: Vec<Member> = self.store.load().await?;

        let syndicate = syndicates
            .into_iter()
            .find(|syndicate| &syndicate.id == id)
            .ok_or_else(|| syndicate_not_found(id))?;
        let overview = overview(syndicate, &members);
        let members = members
            .into_iter()
            .filter(|member| &member.syndicate_id == id)
            .collect();
        Ok(SyndicateDetails { overview, members })
    }

    async fn unassigned_members(&self, session: &Session) -> Result<Vec<Member>, Error> {
        session.require(FeatureArea::Syndicates)?;
        let syndicates: Vec<Syndicate> = self.store.load().await?;
        let members: Vec<Member> = self.store.load().await?;

        let leaders: HashSet<&MemberId> = syndicates
            .iter()
            .filter_map(|syndicate| syndicate.leader_id.as_ref())
            .collect();
        Ok(members
            .iter()
            .filter(|member| !leaders.contains(&member.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
#[path = "syndicate_service_tests.rs"]
mod tests;
