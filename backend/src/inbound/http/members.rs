//! Member registry endpoints for administrators and leaders.

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{Error, Member, MemberId, MemberProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query string of `GET /members`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MemberSearch {
    /// Case-insensitive name match, or substring of id or phone number.
    pub search: Option<String>,
}

/// Scoped members, optionally searched.
#[utoipa::path(
    get,
    path = "/api/v1/members",
    params(MemberSearch),
    responses(
        (status = 200, description = "Members in scope", body = [Member]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Member sessions have no member view", body = Error)
    ),
    tags = ["members"],
    operation_id = "listMembers"
)]
#[get("/members")]
pub async fn list_members(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MemberSearch>,
) -> ApiResult<web::Json<Vec<Member>>> {
    let caller = session.require()?;
    let members = state.members.list(&caller, query.into_inner().search).await?;
    Ok(web::Json(members))
}

/// Register a member in the caller's syndicate.
///
/// The response includes generated login credentials.
#[utoipa::path(
    post,
    path = "/api/v1/members",
    request_body = MemberProfile,
    responses(
        (status = 201, description = "Registered", body = Member),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["members"],
    operation_id = "registerMember"
)]
#[post("/members")]
pub async fn register_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<MemberProfile>,
) -> ApiResult<HttpResponse> {
    let caller = session.require()?;
    let member = state.members.register(&caller, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(member))
}

/// One member in scope.
#[utoipa::path(
    get,
    path = "/api/v1/members/{id}",
    params(("id" = String, Path, description = "Member id")),
    responses(
        (status = 200, description = "Member", body = Member),
        (status = 404, description = "Unknown or out of scope", body = Error)
    ),
    tags = ["members"],
    operation_id = "memberDetails"
)]
#[get("/members/{id}")]
pub async fn member_details(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<Member>> {
    let caller = session.require()?;
    let id = MemberId::new(path.into_inner());
    Ok(web::Json(state.members.details(&caller, &id).await?))
}

/// Replace a member's profile fields.
#[utoipa::path(
    put,
    path = "/api/v1/members/{id}",
    params(("id" = String, Path, description = "Member id")),
    request_body = MemberProfile,
    responses(
        (status = 200, description = "Updated", body = Member),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Unknown or out of scope", body = Error)
    ),
    tags = ["members"],
    operation_id = "updateMember"
)]
#[put("/members/{id}")]
pub async fn update_member(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<MemberProfile>,
) -> ApiResult<web::Json<Member>> {
    let caller = session.require()?;
    let id = MemberId::new(path.into_inner());
    let updated = state
        .members
        .update(&caller, &id, payload.into_inner())
        .await?;
    Ok(web::Json(updated))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::Session;
    use crate::domain::ports::MockMemberRegistry;
    use crate::inbound::http::test_utils::{TestBackend, login_request, session_cookie, test_app};

    #[rstest]
    #[actix_web::test]
    async fn leader_registers_into_own_syndicate() {
        let backend = TestBackend::seeded().await;
        let app = test::init_service(test_app(backend.state)).await;
        let login = test::call_service(&app, login_request("L7", "p7", None).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/members")
                .cookie(session_cookie(&login))
                .set_json(json!({
                    "name": "Eve Moe",
                    "idNumber": "1199080012345678",
                    "phoneNumber": "0788000000",
                    "educationLevel": "tvet"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["syndicateId"], "s7");
        assert_eq!(body["registeredBy"], "L7");
        assert_eq!(body["credentials"]["username"], "member_000001");
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_phone_number_names_the_field() {
        let backend = TestBackend::seeded().await;
        let app = test::init_service(test_app(backend.state)).await;
        let login = test::call_service(&app, login_request("L7", "p7", None).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/members")
                .cookie(session_cookie(&login))
                .set_json(json!({ "name": "Eve Moe", "idNumber": "11990" }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["details"]["field"], "phoneNumber");
    }

    #[rstest]
    #[actix_web::test]
    async fn other_syndicates_member_is_not_found() {
        let backend = TestBackend::seeded().await;
        let app = test::init_service(test_app(backend.state)).await;
        let login = test::call_service(&app, login_request("L7", "p7", None).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/members/m3")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[actix_web::test]
    async fn search_is_passed_through() {
        let backend = TestBackend::seeded().await;
        let mut registry = MockMemberRegistry::new();
        registry
            .expect_list()
            .withf(|session: &Session, search: &Option<String>| {
                session.id() == "leader-s7" && search.as_deref() == Some("jane")
            })
            .times(1)
            .returning(|_, _| Ok(Vec::new()));
        let mut state = backend.state;
        state.members = Arc::new(registry);
        let app = test::init_service(test_app(state)).await;
        let login = test::call_service(&app, login_request("L7", "p7", None).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/members?search=jane")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
