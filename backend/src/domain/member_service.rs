//! Member registration service.
//!
//! Implements [`MemberRegistry`] for administrators and leaders. Lookups and
//! edits only reach members inside the caller's scope; anything else reads
//! as not found.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use tracing::info;

use crate::domain::identity::{IdentityLock, username_in_use};
use crate::domain::ports::{CredentialGenerator, MemberRegistry, issue_unique};
use crate::domain::{
    CredentialKind, Error, FeatureArea, Member, MemberId, MemberProfile, RecordStore, Role,
    ScopeFilter, Session, Syndicate, SyndicateId,
};

fn member_not_found(id: &MemberId) -> Error {
    Error::not_found(format!("member {id} not found"))
}

/// Member service backed by the record store.
pub struct MemberService {
    store: RecordStore,
    clock: Arc<dyn Clock>,
    credentials: Arc<dyn CredentialGenerator>,
    identity_lock: IdentityLock,
}

impl MemberService {
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

    /// Syndicate a new member joins: the leader's own, or the unaffiliated
    /// bucket for administrators.
    fn home_syndicate(session: &Session) -> SyndicateId {
        match (session.role(), session.syndicate_id()) {
            (Role::Admin, _) | (_, None) => SyndicateId::unaffiliated(),
            (_, Some(id)) => id.clone(),
        }
    }
}

#[async_trait]
impl MemberRegistry for MemberService {
    async fn list(&self, session: &Session, search: Option<String>) -> Result<Vec<Member>, Error> {
        session.require(FeatureArea::Members)?;
        let members: Vec<Member> = self.store.load().await?;
        let visible = ScopeFilter::for_session(session, &members).members(members);
        let query = search.unwrap_or_default();
        Ok(visible
            .into_iter()
            .filter(|member| member.matches_search(&query))
            .collect())
    }

    async fn register(&self, session: &Session, profile: MemberProfile) -> Result<Member, Error> {
        session.require(FeatureArea::Members)?;
        let mut profile = profile.validated()?;
        let _guard = self.identity_lock.acquire().await;
        let mut members: Vec<Member> = self.store.load_for_update().await?;
        let syndicates: Vec<Syndicate> = self.store.load_for_update().await?;

        let credentials = issue_unique(self.credentials.as_ref(), CredentialKind::Member, |name| {
            username_in_use(name, &syndicates, &members)
        })
        .ok_or_else(|| Error::internal("could not issue unique member credentials"))?;
        let now = self.clock.utc();
        profile.year_job_start = profile.year_job_start.or(Some(now.year()));

        let member = Member {
            id: MemberId::random(),
            profile,
            syndicate_id: Self::home_syndicate(session),
            registered_by: session.username().to_owned(),
            registered_at: now,
            credentials: Some(credentials),
        };
        members.push(member.clone());
        self.store.save(&members).await?;
        info!(
            member_id = %member.id,
            syndicate_id = %member.syndicate_id,
            registered_by = %member.registered_by,
            "member registered"
        );
        Ok(member)
    }

    async fn update(
        &self,
        session: &Session,
        id: &MemberId,
        profile: MemberProfile,
    ) -> Result<Member, Error> {
        session.require(FeatureArea::Members)?;
        let mut profile = profile.validated()?;
        let _guard = self.identity_lock.acquire().await;
        let mut members: Vec<Member> = self.store.load_for_update().await?;
        let filter = ScopeFilter::for_session(session, &members);

        let member = members
            .iter_mut()
            .find(|member| &member.id == id && filter.admits_member(member))
            .ok_or_else(|| member_not_found(id))?;
        profile.year_job_start = profile.year_job_start.or(member.profile.year_job_start);
        member.profile = profile;
        let updated = member.clone();

        self.store.save(&members).await?;
        info!(member_id = %updated.id, "member updated");
        Ok(updated)
    }

    async fn details(&self, session: &Session, id: &MemberId) -> Result<Member, Error> {
        session.require(FeatureArea::Members)?;
        let members: Vec<Member> = self.store.load().await?;
        let filter = ScopeFilter::for_session(session, &members);
        members
            .into_iter()
            .find(|member| &member.id == id && filter.admits_member(member))
            .ok_or_else(|| member_not_found(id))
    }
}

#[cfg(test)]
#[path = "member_service_tests.rs"]
mod tests;
