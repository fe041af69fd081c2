//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod blob_store;
mod contribution_ledger;
mod credential_generator;
mod dashboard_query;
mod login_service;
mod member_registry;
mod syndicate_directory;
mod training_catalogue;

#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError, is_valid_blob_key};
#[cfg(test)]
pub use contribution_ledger::MockContributionLedger;
pub use contribution_ledger::{ContributionLedger, ContributionsView};
#[cfg(test)]
pub use credential_generator::MockCredentialGenerator;
pub use credential_generator::{
    CredentialGenerator, MAX_CREDENTIAL_DRAWS, SequentialCredentialGenerator, issue_unique,
};
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
pub use dashboard_query::{DashboardQuery, DashboardReport};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use member_registry::MemberRegistry;
#[cfg(test)]
pub use member_registry::MockMemberRegistry;
#[cfg(test)]
pub use syndicate_directory::MockSyndicateDirectory;
pub use syndicate_directory::{
    SyndicateDetails, SyndicateDirectory, SyndicateOverview, UNASSIGNED_LEADER,
};
#[cfg(test)]
pub use training_catalogue::MockTrainingCatalogue;
pub use training_catalogue::{TrainingCatalogue, TrainingView};
