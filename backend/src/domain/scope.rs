//! Per-session visibility over the persisted collections.
//!
//! One filter serves every feature area. It is pure: scoping the same data
//! twice yields the same result, and a member session whose record cannot
//! be found sees nothing at all rather than an error.

use std::collections::HashSet;

use super::{Contribution, Member, MemberId, Role, Session, Syndicate, SyndicateId, Training};

/// Every persisted collection, loaded together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Syndicate records.
    pub syndicates: Vec<Syndicate>,
    /// Member records.
    pub members: Vec<Member>,
    /// Contribution records.
    pub contributions: Vec<Contribution>,
    /// Training records.
    pub trainings: Vec<Training>,
}

impl Dataset {
    /// Narrow every collection to what `session` may see.
    #[must_use]
    pub fn scoped(self, session: &Session) -> Self {
        ScopeFilter::for_session(session, &self.members).apply(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Audience {
    Everything,
    Syndicate(SyndicateId),
    Member(MemberId),
    Nothing,
}

/// Visibility rules resolved for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFilter {
    audience: Audience,
}

impl ScopeFilter {
    /// Resolve the rules for `session`.
    ///
    /// Member sessions are linked to their record through the credential
    /// username, so the full member collection is needed here.
    #[must_use]
    pub fn for_session(session: &Session, members: &[Member]) -> Self {
        let audience = match session.role() {
            Role::Admin => Audience::Everything,
            Role::Leader => session
                .syndicate_id()
                .cloned()
                .map_or(Audience::Nothing, Audience::Syndicate),
            Role::Member => members
                .iter()
                .find(|member| member.has_username(session.username()))
                .map_or(Audience::Nothing, |member| Audience::Member(member.id.clone())),
        };
        Self { audience }
    }

    /// Id of the member record a member session resolved to.
    #[must_use]
    pub fn own_member_id(&self) -> Option<&MemberId> {
        match &self.audience {
            Audience::Member(id) => Some(id),
            _ => None,
        }
    }

    /// Whether `member` is visible.
    #[must_use]
    pub fn admits_member(&self, member: &Member) -> bool {
        match &self.audience {
            Audience::Everything => true,
            Audience::Syndicate(syndicate_id) => &member.syndicate_id == syndicate_id,
            Audience::Member(member_id) => &member.id == member_id,
            Audience::Nothing => false,
        }
    }

    /// Whether `training` is visible.
    #[must_use]
    pub fn admits_training(&self, training: &Training) -> bool {
        match &self.audience {
            Audience::Everything => true,
            Audience::Syndicate(syndicate_id) => training.visible_to_syndicate(syndicate_id),
            Audience::Member(_) | Audience::Nothing => false,
        }
    }

    /// Whether syndicate records are visible at all.
    #[must_use]
    pub fn admits_syndicates(&self) -> bool {
        self.audience == Audience::Everything
    }

    /// Visible members.
    #[must_use]
    pub fn members(&self, members: Vec<Member>) -> Vec<Member> {
        members
            .into_iter()
            .filter(|member| self.admits_member(member))
            .collect()
    }

    /// Visible contributions, given the already scoped members.
    #[must_use]
    pub fn contributions(
        &self,
        contributions: Vec<Contribution>,
        scoped_members: &[Member],
    ) -> Vec<Contribution> {
        if self.audience == Audience::Everything {
            return contributions;
        }
        let visible: HashSet<&MemberId> = scoped_members.iter().map(|member| &member.id).collect();
        contributions
            .into_iter()
            .filter(|contribution| visible.contains(&contribution.member_id))
            .collect()
    }

    /// Visible trainings.
    #[must_use]
    pub fn trainings(&self, trainings: Vec<Training>) -> Vec<Training> {
        trainings
            .into_iter()
            .filter(|training| self.admits_training(training))
            .collect()
    }

    /// Visible syndicates.
    #[must_use]
    pub fn syndicates(&self, syndicates: Vec<Syndicate>) -> Vec<Syndicate> {
        if self.admits_syndicates() {
            syndicates
        } else {
            Vec::new()
        }
    }

    /// Narrow a whole dataset.
    #[must_use]
    pub fn apply(&self, dataset: Dataset) -> Dataset {
        let Dataset {
            syndicates,
            members,
            contributions,
            trainings,
        } = dataset;
        let members = self.members(members);
        let contributions = self.contributions(contributions, &members);
        Dataset {
            syndicates: self.syndicates(syndicates),
            members,
            contributions,
            trainings: self.trainings(trainings),
        }
    }
}
