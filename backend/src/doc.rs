//! OpenAPI document for the REST API.
//!
//! Registers every `/api/v1` handler, the health probes, the request and
//! response schemas and the session cookie security scheme. Swagger UI
//! serves it at `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    ContributionsView, DashboardReport, SyndicateDetails, SyndicateOverview, TrainingView,
};
use crate::domain::{
    Contribution, ContributionActivity, ContributionSummary, Credentials, DashboardStats,
    DistributionBucket, EducationLevel, Error, ErrorCode, FeatureArea, MaritalStatus, Member,
    MemberProfile, MonthlyTotal, PaymentMethod, Period, Role, Session, Syndicate,
    SyndicatePerformance, Training, TrainingStatus,
};
use crate::inbound::http::auth::{LoginRequest, SessionResponse};
use crate::inbound::http::contributions::RecordContributionRequest;
use crate::inbound::http::syndicates::{
    AssignLeaderRequest, CreateSyndicateRequest, UpdateSyndicateRequest,
};
use crate::inbound::http::trainings::{CreateTrainingRequest, RegisterMemberRequest};
use crate::inbound::http::users::UserSummary;

/// Adds the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Syndicate desk API",
        description = "Role-scoped administration of syndicates, members, contributions and trainings.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::syndicates::list_syndicates,
        crate::inbound::http::syndicates::create_syndicate,
        crate::inbound::http::syndicates::unassigned_members,
        crate::inbound::http::syndicates::syndicate_details,
        crate::inbound::http::syndicates::update_syndicate,
        crate::inbound::http::syndicates::assign_leader,
        crate::inbound::http::members::list_members,
        crate::inbound::http::members::register_member,
        crate::inbound::http::members::member_details,
        crate::inbound::http::members::update_member,
        crate::inbound::http::contributions::list_contributions,
        crate::inbound::http::contributions::record_contribution,
        crate::inbound::http::contributions::monthly_contributions,
        crate::inbound::http::trainings::list_trainings,
        crate::inbound::http::trainings::create_training,
        crate::inbound::http::trainings::register_for_training,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error, ErrorCode,
        LoginRequest, SessionResponse, Session, Role, FeatureArea,
        Syndicate, SyndicateOverview, SyndicateDetails, Credentials,
        CreateSyndicateRequest, UpdateSyndicateRequest, AssignLeaderRequest,
        Member, MemberProfile, EducationLevel, MaritalStatus,
        Contribution, PaymentMethod, Period, ContributionsView, ContributionSummary,
        ContributionActivity, MonthlyTotal, RecordContributionRequest,
        Training, TrainingStatus, TrainingView, CreateTrainingRequest, RegisterMemberRequest,
        DashboardReport, DashboardStats, DistributionBucket, SyndicatePerformance,
        UserSummary,
    )),
    tags(
        (name = "auth", description = "Login, logout and session lookup"),
        (name = "syndicates", description = "Syndicate administration"),
        (name = "members", description = "Member registry"),
        (name = "contributions", description = "Contribution ledger"),
        (name = "trainings", description = "Training catalogue"),
        (name = "dashboard", description = "Overview statistics"),
        (name = "users", description = "Fixed user directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => false,
        }
    }

    #[rstest]
    #[case("Error", "code")]
    #[case("Error", "message")]
    #[case("MemberProfile", "phoneNumber")]
    #[case("Contribution", "paymentMethod")]
    #[case("RecordContributionRequest", "memberId")]
    fn schemas_use_wire_field_names(#[case] name: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");

        assert!(object_has_field(schema, field), "{name} lacks {field}");
    }

    #[rstest]
    #[case("/api/v1/login")]
    #[case("/api/v1/syndicates/{id}/leader")]
    #[case("/api/v1/contributions/monthly")]
    #[case("/api/v1/trainings/{id}/registrations")]
    #[case("/api/v1/dashboard")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");

        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
