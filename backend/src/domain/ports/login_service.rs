//! Driving port for login and session lifecycle.
//!
//! Inbound adapters call it to turn submitted credentials into a session
//! without knowing where identities are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Role, Session};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Resolve credentials to a session and make it the active one.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
        claimed_role: Option<Role>,
    ) -> Result<Session, Error>;

    /// Drop the active session.
    async fn logout(&self) -> Result<(), Error>;

    /// Session persisted by the last login, if any.
    async fn current(&self) -> Result<Option<Session>, Error>;
}
