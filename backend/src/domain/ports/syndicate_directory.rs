//! Driving port for syndicate administration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, LeaderAssignment, Member, NewSyndicate, Session, Syndicate, SyndicateId,
    SyndicateUpdate,
};

/// Leader name shown when no member resolves.
pub const UNASSIGNED_LEADER: &str = "Not assigned";

/// Syndicate row with live figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyndicateOverview {
    /// Stored record.
    #[serde(flatten)]
    pub syndicate: Syndicate,
    /// Leader member name or [`UNASSIGNED_LEADER`].
    pub leader_name: String,
    /// Members currently owned by the syndicate.
    pub live_member_count: usize,
}

/// Syndicate with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyndicateDetails {
    /// Summary row.
    #[serde(flatten)]
    pub overview: SyndicateOverview,
    /// Members owned by the syndicate.
    pub members: Vec<Member>,
}

/// Administrator operations over syndicates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyndicateDirectory: Send + Sync {
    /// Every syndicate with live figures.
    async fn list(&self, session: &Session) -> Result<Vec<SyndicateOverview>, Error>;

    /// Create a syndicate.
    async fn create(&self, session: &Session, input: NewSyndicate) -> Result<Syndicate, Error>;

    /// Make a member leader and issue fresh leader credentials.
    async fn assign_leader(
        &self,
        session: &Session,
        assignment: LeaderAssignment,
    ) -> Result<Syndicate, Error>;

    /// Rename a syndicate and replace its leader credentials.
    async fn update(
        &self,
        session: &Session,
        id: &SyndicateId,
        update: SyndicateUpdate,
    ) -> Result<Syndicate, Error>;

    /// One syndicate with its members.
    async fn details(&self, session: &Session, id: &SyndicateId)
    -> Result<SyndicateDetails, Error>;

    /// Members not leading any syndicate.
    async fn unassigned_members(&self, session: &Session) -> Result<Vec<Member>, Error>;
}
