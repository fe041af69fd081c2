//! Login service over the record store.
//!
//! A successful login replaces the persisted session; a failed one leaves it
//! untouched.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::LoginService;
use crate::domain::{
    Error, LoginCredentials, Member, RecordStore, Role, Session, Syndicate, authenticate,
};

/// Resolves identities against the stored syndicates and members.
#[derive(Clone)]
pub struct AuthService {
    store: RecordStore,
}

impl AuthService {
    /// Create the service.
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LoginService for AuthService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
        claimed_role: Option<Role>,
    ) -> Result<Session, Error> {
        let syndicates: Vec<Syndicate> = self.store.load().await?;
        let members: Vec<Member> = self.store.load().await?;
        let session = authenticate(credentials, claimed_role, &syndicates, &members).map_err(
            |failure| {
                warn!(username = credentials.username(), "login rejected");
                Error::from(failure)
            },
        )?;
        self.store.save_session(&session).await?;
        info!(
            session_id = session.id(),
            role = %session.role(),
            "session started"
        );
        Ok(session)
    }

    async fn logout(&self) -> Result<(), Error> {
        self.store.clear_session().await?;
        info!("session ended");
        Ok(())
    }

    async fn current(&self) -> Result<Option<Session>, Error> {
        self.store.load_session().await
    }
}
