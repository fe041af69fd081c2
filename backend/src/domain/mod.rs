//! Domain primitives, aggregates and services.
//!
//! Purpose: define the records the dashboard manages, the rules deciding who
//! may see them and the statistics derived from them. Types here know nothing
//! about HTTP or the filesystem; adapters reach them through [`ports`].
//!
//! Public surface:
//! - Records: [`Syndicate`], [`Member`], [`Contribution`], [`Training`].
//! - Identity: [`LoginCredentials`], [`Session`], [`Role`], [`authenticate`].
//! - Visibility: [`ScopeFilter`] and [`Dataset::scoped`].
//! - Persistence contract: [`RecordStore`] over the blob store port.
//! - Services implementing the driving ports.

pub mod error;
pub mod ports;

mod auth_service;
mod contribution;
mod contribution_service;
mod credentials;
mod dashboard_service;
pub mod identity;
mod ids;
mod json_fields;
mod member;
mod member_service;
mod record_store;
pub mod reporting;
mod scope;
mod session;
mod syndicate;
mod syndicate_service;
mod trace_id;
mod training;
mod training_service;

pub(crate) use self::error::invalid_request_from;
pub use self::auth_service::AuthService;
pub use self::contribution::{
    Contribution, ContributionValidationError, NewContribution, PaymentMethod, Period,
};
pub use self::contribution_service::ContributionService;
pub use self::credentials::{CredentialKind, Credentials, LoginCredentials, LoginValidationError};
pub use self::dashboard_service::DashboardService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldViolation};
pub use self::identity::{AuthFailure, IdentityLock, authenticate};
pub use self::ids::{ContributionId, MemberId, SyndicateId, TrainingId};
pub use self::member::{
    EducationLevel, MaritalStatus, Member, MemberProfile, MemberValidationError,
};
pub use self::member_service::MemberService;
pub use self::record_store::{Collection, Record, RecordStore, SESSION_KEY};
pub use self::reporting::{
    ContributionActivity, ContributionSummary, DashboardStats, DistributionBucket, MonthlyTotal,
    SyndicatePerformance,
};
pub use self::scope::{Dataset, ScopeFilter};
pub use self::session::{FeatureArea, Role, Session};
pub use self::syndicate::{
    LeaderAssignment, LeaderSource, NewSyndicate, Syndicate, SyndicateUpdate,
    SyndicateValidationError,
};
pub use self::syndicate_service::SyndicateService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::training::{
    NewTraining, RegistrationError, Training, TrainingRegistration, TrainingStatus,
    TrainingValidationError,
};
pub use self::training_service::TrainingService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use syndicate_desk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
