//! Authenticated session and role model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Error, Member, Syndicate, SyndicateId};

/// Role carried by a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Organisation-wide administrator.
    Admin,
    /// Leader of exactly one syndicate.
    Leader,
    /// Individual member.
    Member,
}

impl Role {
    /// Feature areas available to the role, in navigation order.
    #[must_use]
    pub const fn feature_areas(self) -> &'static [FeatureArea] {
        match self {
            Self::Admin => &[
                FeatureArea::Overview,
                FeatureArea::Members,
                FeatureArea::Contributions,
                FeatureArea::Trainings,
                FeatureArea::Syndicates,
            ],
            Self::Leader => &[
                FeatureArea::Overview,
                FeatureArea::Members,
                FeatureArea::Contributions,
                FeatureArea::Trainings,
            ],
            Self::Member => &[FeatureArea::Contributions],
        }
    }

    /// Whether the role may use `area`.
    #[must_use]
    pub fn can_access(self, area: FeatureArea) -> bool {
        self.feature_areas().contains(&area)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Admin => "admin",
            Self::Leader => "leader",
            Self::Member => "member",
        })
    }
}

/// Feature areas of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FeatureArea {
    /// Dashboard statistics.
    Overview,
    /// Member registry.
    Members,
    /// Contribution ledger.
    Contributions,
    /// Training programs.
    Trainings,
    /// Syndicate administration.
    Syndicates,
}

impl fmt::Display for FeatureArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Overview => "overview",
            Self::Members => "members",
            Self::Contributions => "contributions",
            Self::Trainings => "trainings",
            Self::Syndicates => "syndicates",
        })
    }
}

/// The single active identity of a client.
///
/// Session ids follow `admin-1`, `leader-<syndicate id>` and
/// `member-<member id>`. Leader and member sessions carry the syndicate they
/// belong to; admin sessions carry none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: String,
    username: String,
    role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    syndicate_id: Option<SyndicateId>,
}

impl Session {
    /// Session for the built-in administrator.
    pub fn admin(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            role: Role::Admin,
            syndicate_id: None,
        }
    }

    /// Session for the leader of `syndicate`.
    pub fn leader(syndicate: &Syndicate, username: impl Into<String>) -> Self {
        Self {
            id: format!("leader-{}", syndicate.id),
            username: username.into(),
            role: Role::Leader,
            syndicate_id: Some(syndicate.id.clone()),
        }
    }

    /// Session for `member`.
    pub fn member(member: &Member, username: impl Into<String>) -> Self {
        Self {
            id: format!("member-{}", member.id),
            username: username.into(),
            role: Role::Member,
            syndicate_id: Some(member.syndicate_id.clone()),
        }
    }

    /// Session identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Username the session logged in with.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Session role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Syndicate of a leader or member session.
    #[must_use]
    pub fn syndicate_id(&self) -> Option<&SyndicateId> {
        self.syndicate_id.as_ref()
    }

    /// Fail with `forbidden` unless the role may use `area`.
    pub fn require(&self, area: FeatureArea) -> Result<(), Error> {
        if self.role.can_access(area) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "{} sessions may not access {area}",
                self.role
            )))
        }
    }
}
