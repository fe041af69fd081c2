//! Resolution of submitted credentials to a session.
//!
//! Three identity spaces are checked in a fixed order: the built-in
//! administrator, syndicate leader credentials, then member credentials.
//! The first match wins. The claimed role only gates the administrator
//! branch; leader and member pairs authenticate whatever role was claimed.

use std::fmt;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use super::{Error, LoginCredentials, Member, Role, Session, Syndicate};

/// Built-in administrator username.
pub const ADMIN_USERNAME: &str = "admin";
/// Built-in administrator password.
pub const ADMIN_PASSWORD: &str = "admin123";
/// Session id issued to the administrator.
pub const ADMIN_SESSION_ID: &str = "admin-1";

/// Credentials matched no identity. Carries no detail about which part was
/// wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFailure;

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid credentials")
    }
}

impl std::error::Error for AuthFailure {}

impl From<AuthFailure> for Error {
    fn from(value: AuthFailure) -> Self {
        Error::unauthorized(value.to_string())
    }
}

/// Match `credentials` against every identity space.
pub fn authenticate(
    credentials: &LoginCredentials,
    claimed_role: Option<Role>,
    syndicates: &[Syndicate],
    members: &[Member],
) -> Result<Session, AuthFailure> {
    if claimed_role == Some(Role::Admin)
        && credentials.username() == ADMIN_USERNAME
        && credentials.password() == ADMIN_PASSWORD
    {
        return Ok(Session::admin(ADMIN_SESSION_ID, ADMIN_USERNAME));
    }

    if let Some(syndicate) = syndicates
        .iter()
        .find(|syndicate| credentials.matches(&syndicate.leader_credentials))
    {
        return Ok(Session::leader(syndicate, credentials.username()));
    }

    members
        .iter()
        .find(|member| {
            member
                .credentials
                .as_ref()
                .is_some_and(|stored| credentials.matches(stored))
        })
        .map(|member| Session::member(member, credentials.username()))
        .ok_or(AuthFailure)
}

/// Whether `username` already names an identity in any space.
#[must_use]
pub fn username_in_use(username: &str, syndicates: &[Syndicate], members: &[Member]) -> bool {
    username == ADMIN_USERNAME
        || syndicates
            .iter()
            .any(|syndicate| syndicate.leader_credentials.username == username)
        || members.iter().any(|member| member.has_username(username))
}

/// Write lock shared by every service that issues login usernames.
///
/// Holding it from the [`username_in_use`] check until the new identity is
/// saved keeps two writers from handing out the same username.
#[derive(Clone, Default)]
pub struct IdentityLock(Arc<Mutex<()>>);

impl IdentityLock {
    /// Wait for exclusive access to the identity spaces.
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        self.0.lock().await
    }
}
