//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only depend on the driving
//! ports, so they can be tested with mocks or with services over an
//! in-memory blob store.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    ContributionLedger, CredentialGenerator, DashboardQuery, LoginService, MemberRegistry,
    SyndicateDirectory, TrainingCatalogue,
};
use crate::domain::{
    AuthService, ContributionService, DashboardService, IdentityLock, MemberService, RecordStore,
    SyndicateService, TrainingService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub syndicates: Arc<dyn SyndicateDirectory>,
    pub members: Arc<dyn MemberRegistry>,
    pub contributions: Arc<dyn ContributionLedger>,
    pub trainings: Arc<dyn TrainingCatalogue>,
    pub dashboard: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Wire every port to the record-store backed services.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use syndicate_desk::domain::RecordStore;
    /// use syndicate_desk::inbound::http::state::HttpState;
    /// use syndicate_desk::outbound::blob_store::InMemoryBlobStore;
    /// use syndicate_desk::outbound::credentials::RandomCredentialGenerator;
    ///
    /// let store = RecordStore::new(Arc::new(InMemoryBlobStore::new()));
    /// let state = HttpState::from_record_store(
    ///     store,
    ///     Arc::new(DefaultClock),
    ///     Arc::new(RandomCredentialGenerator),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn from_record_store(
        store: RecordStore,
        clock: Arc<dyn Clock>,
        credentials: Arc<dyn CredentialGenerator>,
    ) -> Self {
        let identity_lock = IdentityLock::default();
        Self {
            login: Arc::new(AuthService::new(store.clone())),
            syndicates: Arc::new(SyndicateService::new(
                store.clone(),
                clock.clone(),
                credentials.clone(),
                identity_lock.clone(),
            )),
            members: Arc::new(MemberService::new(
                store.clone(),
                clock.clone(),
                credentials,
                identity_lock,
            )),
            contributions: Arc::new(ContributionService::new(store.clone(), clock.clone())),
            trainings: Arc::new(TrainingService::new(store.clone(), clock)),
            dashboard: Arc::new(DashboardService::new(store)),
        }
    }
}
