//! Overview dashboard endpoint.

use actix_web::{get, web};

use crate::domain::Error;
use crate::domain::ports::DashboardReport;
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Statistics, charts and recent activity for the caller's scope.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    responses(
        (status = 200, description = "Dashboard report", body = DashboardReport),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Member sessions have no overview", body = Error)
    ),
    tags = ["dashboard"],
    operation_id = "dashboard"
)]
#[get("/dashboard")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<DashboardReport>> {
    let caller = session.require()?;
    Ok(web::Json(state.dashboard.report(&caller).await?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ports::MockDashboardQuery;
    use crate::inbound::http::test_utils::{TestBackend, login_request, session_cookie, test_app};

    async fn fetch(username: &str, password: &str, role: Option<&str>) -> (StatusCode, Value) {
        let backend = TestBackend::seeded().await;
        let app = test::init_service(test_app(backend.state)).await;
        let login =
            test::call_service(&app, login_request(username, password, role).to_request()).await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;
        let status = res.status();
        (status, test::read_body_json(res).await)
    }

    #[rstest]
    #[actix_web::test]
    async fn admin_sees_every_syndicate() {
        let (status, body) = fetch("admin", "admin123", Some("admin")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["totalSyndicates"], 2);
        assert_eq!(body["stats"]["totalContributions"], 12000.0);
        assert_eq!(body["syndicatePerformance"].as_array().map(Vec::len), Some(2));
    }

    #[rstest]
    #[actix_web::test]
    async fn leader_report_is_confined() {
        let (status, body) = fetch("L7", "p7", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stats"]["totalSyndicates"], 1);
        assert_eq!(body["stats"]["totalMembers"], 2);
        assert_eq!(body["stats"]["totalContributions"], 5000.0);
        assert_eq!(body["syndicatePerformance"], serde_json::json!([]));
    }

    #[rstest]
    #[actix_web::test]
    async fn members_are_forbidden() {
        let (status, body) = fetch("member_jane01", "secret", None).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "forbidden");
    }

    #[rstest]
    #[actix_web::test]
    async fn internal_failures_are_redacted() {
        let backend = TestBackend::seeded().await;
        let mut query = MockDashboardQuery::new();
        query
            .expect_report()
            .returning(|_| Err(Error::internal("blob read failed: /data/members.json")));
        let mut state = backend.state;
        state.dashboard = Arc::new(query);
        let app = test::init_service(test_app(state)).await;
        let login = test::call_service(&app, login_request("L7", "p7", None).to_request()).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/v1/dashboard")
                .cookie(session_cookie(&login))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Internal server error");
    }
}
