//! Syndicate records and the inputs that create or edit them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::json_fields::empty_as_none;
use super::{Credentials, FieldViolation, MemberId, SyndicateId, invalid_request_from};

/// Organisational sub-unit grouping members under one leader.
///
/// `leader_credentials` form an identity namespace of their own, separate from
/// member credentials. `leader_id` is a weak back-reference to a member and may
/// be empty. `member_count` is whatever was stored at creation; read views
/// compute live counts instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Syndicate {
    /// Record id.
    pub id: SyndicateId,
    /// Display name.
    pub name: String,
    /// Member acting as leader, if one was assigned.
    #[serde(default, with = "empty_as_none")]
    #[schema(value_type = String)]
    pub leader_id: Option<MemberId>,
    /// Leader login pair.
    pub leader_credentials: Credentials,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Stored member count.
    #[serde(default)]
    pub member_count: u32,
}

/// Validation failures for syndicate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyndicateValidationError {
    /// Name was blank.
    EmptyName,
    /// Leader username was blank.
    EmptyLeaderUsername,
    /// Leader password was blank.
    EmptyLeaderPassword,
    /// Syndicate id was blank.
    EmptySyndicateId,
    /// Member id was blank.
    EmptyMemberId,
}

impl fmt::Display for SyndicateValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "syndicate name must not be empty"),
            Self::EmptyLeaderUsername => write!(f, "leader username must not be empty"),
            Self::EmptyLeaderPassword => write!(f, "leader password must not be empty"),
            Self::EmptySyndicateId => write!(f, "syndicate must be selected"),
            Self::EmptyMemberId => write!(f, "member must be selected"),
        }
    }
}

impl std::error::Error for SyndicateValidationError {}

impl FieldViolation for SyndicateValidationError {
    fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyLeaderUsername => "leaderUsername",
            Self::EmptyLeaderPassword => "leaderPassword",
            Self::EmptySyndicateId => "syndicateId",
            Self::EmptyMemberId => "memberId",
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::EmptyName => "empty_name",
            Self::EmptyLeaderUsername => "empty_leader_username",
            Self::EmptyLeaderPassword => "empty_leader_password",
            Self::EmptySyndicateId => "empty_syndicate_id",
            Self::EmptyMemberId => "empty_member_id",
        }
    }
}

invalid_request_from!(SyndicateValidationError);

/// How a new syndicate obtains its leader identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderSource {
    /// Credentials typed by the administrator; no member is linked.
    Explicit(Credentials),
    /// An existing member becomes leader and receives generated credentials.
    FromMember(MemberId),
}

/// Validated input for creating a syndicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSyndicate {
    name: String,
    leader: LeaderSource,
}

impl NewSyndicate {
    /// Validate raw form values.
    ///
    /// A non-blank `leader_member_id` takes precedence; otherwise both
    /// explicit credentials are required.
    pub fn try_from_parts(
        name: &str,
        leader_member_id: Option<&str>,
        leader_username: Option<&str>,
        leader_password: Option<&str>,
    ) -> Result<Self, SyndicateValidationError> {
        let name = require(name, SyndicateValidationError::EmptyName)?;
        let member_id = leader_member_id
            .map(str::trim)
            .filter(|id| !id.is_empty());
        let leader = if let Some(id) = member_id {
            LeaderSource::FromMember(MemberId::new(id))
        } else {
            let username = require(
                leader_username.unwrap_or_default(),
                SyndicateValidationError::EmptyLeaderUsername,
            )?;
            let password = leader_password
                .filter(|pw| !pw.is_empty())
                .ok_or(SyndicateValidationError::EmptyLeaderPassword)?;
            LeaderSource::Explicit(Credentials::new(username, password))
        };
        Ok(Self { name, leader })
    }

    /// Syndicate name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leader identity source.
    #[must_use]
    pub fn leader(&self) -> &LeaderSource {
        &self.leader
    }
}

/// Validated edit of a syndicate's name and leader credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyndicateUpdate {
    name: String,
    leader_credentials: Credentials,
}

impl SyndicateUpdate {
    /// Validate raw form values; every field is required.
    pub fn try_from_parts(
        name: &str,
        leader_username: &str,
        leader_password: &str,
    ) -> Result<Self, SyndicateValidationError> {
        let name = require(name, SyndicateValidationError::EmptyName)?;
        let username = require(leader_username, SyndicateValidationError::EmptyLeaderUsername)?;
        if leader_password.is_empty() {
            return Err(SyndicateValidationError::EmptyLeaderPassword);
        }
        Ok(Self {
            name,
            leader_credentials: Credentials::new(username, leader_password),
        })
    }

    /// Apply the edit, keeping id, leader link, creation time and count.
    pub fn apply_to(self, syndicate: &mut Syndicate) {
        syndicate.name = self.name;
        syndicate.leader_credentials = self.leader_credentials;
    }
}

/// Validated leader assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderAssignment {
    /// Target syndicate.
    pub syndicate_id: SyndicateId,
    /// Member to promote.
    pub member_id: MemberId,
}

impl LeaderAssignment {
    /// Validate that both selections were made.
    pub fn try_from_parts(
        syndicate_id: &str,
        member_id: &str,
    ) -> Result<Self, SyndicateValidationError> {
        let syndicate_id = require(syndicate_id, SyndicateValidationError::EmptySyndicateId)?;
        let member_id = require(member_id, SyndicateValidationError::EmptyMemberId)?;
        Ok(Self {
            syndicate_id: SyndicateId::new(syndicate_id),
            member_id: MemberId::new(member_id),
        })
    }
}

fn require(value: &str, error: SyndicateValidationError) -> Result<String, SyndicateValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(error)
    } else {
        Ok(trimmed.to_owned())
    }
}
