//! Driving port for member registration and lookup.

use async_trait::async_trait;

use crate::domain::{Error, Member, MemberId, MemberProfile, Session};

/// Member operations for administrators and leaders.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRegistry: Send + Sync {
    /// Visible members matching `search`.
    async fn list(&self, session: &Session, search: Option<String>) -> Result<Vec<Member>, Error>;

    /// Register a member and issue their credentials.
    async fn register(&self, session: &Session, profile: MemberProfile) -> Result<Member, Error>;

    /// Replace a visible member's profile.
    async fn update(
        &self,
        session: &Session,
        id: &MemberId,
        profile: MemberProfile,
    ) -> Result<Member, Error>;

    /// One visible member.
    async fn details(&self, session: &Session, id: &MemberId) -> Result<Member, Error>;
}
