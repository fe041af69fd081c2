//! Syndicate administration endpoints (administrators only).

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::{SyndicateDetails, SyndicateOverview};
use crate::domain::{
    Error, LeaderAssignment, Member, NewSyndicate, Syndicate, SyndicateId, SyndicateUpdate,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /syndicates`.
///
/// Naming `leaderMemberId` generates leader credentials; otherwise both
/// `leaderUsername` and `leaderPassword` are required.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSyndicateRequest {
    pub name: String,
    #[serde(default)]
    pub leader_member_id: Option<String>,
    #[serde(default)]
    pub leader_username: Option<String>,
    #[serde(default)]
    pub leader_password: Option<String>,
}

impl TryFrom<CreateSyndicateRequest> for NewSyndicate {
    type Error = Error;

    fn try_from(value: CreateSyndicateRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(
            &value.name,
            value.leader_member_id.as_deref(),
            value.leader_username.as_deref(),
            value.leader_password.as_deref(),
        )?)
    }
}

/// Body of `PUT /syndicates/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSyndicateRequest {
    pub name: String,
    pub leader_username: String,
    pub leader_password: String,
}

/// Body of `POST /syndicates/{id}/leader`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignLeaderRequest {
    pub member_id: String,
}

/// All syndicates with live member counts.
#[utoipa::path(
    get,
    path = "/api/v1/syndicates",
    responses(
        (status = 200, description = "Syndicates", body = [SyndicateOverview]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "listSyndicates"
)]
#[get("/syndicates")]
pub async fn list_syndicates(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SyndicateOverview>>> {
    let caller = session.require()?;
    Ok(web::Json(state.syndicates.list(&caller).await?))
}

/// Create a syndicate.
#[utoipa::path(
    post,
    path = "/api/v1/syndicates",
    request_body = CreateSyndicateRequest,
    responses(
        (status = 201, description = "Created", body = Syndicate),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "Leader member not found", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "createSyndicate"
)]
#[post("/syndicates")]
pub async fn create_syndicate(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateSyndicateRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require()?;
    let input = NewSyndicate::try_from(payload.into_inner())?;
    let created = state.syndicates.create(&caller, input).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Members that lead no syndicate.
#[utoipa::path(
    get,
    path = "/api/v1/syndicates/unassigned-members",
    responses(
        (status = 200, description = "Leader candidates", body = [Member]),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "unassignedMembers"
)]
#[get("/syndicates/unassigned-members")]
pub async fn unassigned_members(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Member>>> {
    let caller = session.require()?;
    Ok(web::Json(state.syndicates.unassigned_members(&caller).await?))
}

/// One syndicate with its members.
#[utoipa::path(
    get,
    path = "/api/v1/syndicates/{id}",
    params(("id" = String, Path, description = "Syndicate id")),
    responses(
        (status = 200, description = "Syndicate details", body = SyndicateDetails),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "Unknown syndicate", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "syndicateDetails"
)]
#[get("/syndicates/{id}")]
pub async fn syndicate_details(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<SyndicateDetails>> {
    let caller = session.require()?;
    let id = SyndicateId::new(path.into_inner());
    Ok(web::Json(state.syndicates.details(&caller, &id).await?))
}

/// Rename a syndicate and replace its leader credentials.
#[utoipa::path(
    put,
    path = "/api/v1/syndicates/{id}",
    params(("id" = String, Path, description = "Syndicate id")),
    request_body = UpdateSyndicateRequest,
    responses(
        (status = 200, description = "Updated", body = Syndicate),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown syndicate", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "updateSyndicate"
)]
#[put("/syndicates/{id}")]
pub async fn update_syndicate(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateSyndicateRequest>,
) -> ApiResult<web::Json<Syndicate>> {
    let caller = session.require()?;
    let body = payload.into_inner();
    let update =
        SyndicateUpdate::try_from_parts(&body.name, &body.leader_username, &body.leader_password)?;
    let id = SyndicateId::new(path.into_inner());
    Ok(web::Json(state.syndicates.update(&caller, &id, update).await?))
}

/// Make a member the syndicate leader; the response carries the new
/// credentials.
#[utoipa::path(
    post,
    path = "/api/v1/syndicates/{id}/leader",
    params(("id" = String, Path, description = "Syndicate id")),
    request_body = AssignLeaderRequest,
    responses(
        (status = 200, description = "Leader assigned", body = Syndicate),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown syndicate or member", body = Error)
    ),
    tags = ["syndicates"],
    operation_id = "assignLeader"
)]
#[post("/syndicates/{id}/leader")]
pub async fn assign_leader(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AssignLeaderRequest>,
) -> ApiResult<web::Json<Syndicate>> {
    let caller = session.require()?;
    let assignment = LeaderAssignment::try_from_parts(&path.into_inner(), &payload.member_id)?;
    Ok(web::Json(state.syndicates.assign_leader(&caller, assignment).await?))
}
