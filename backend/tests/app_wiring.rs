//! Middleware and routing of the assembled application.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;

use syndicate_desk::domain::{TRACE_ID_HEADER, TraceId};
use support::{Deployment, send};

#[rstest]
#[actix_rt::test]
async fn api_errors_echo_the_trace_header() {
    let deployment = Deployment::new();
    let app = deployment.start().await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/dashboard").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header = res
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace header");
    assert!(header.parse::<TraceId>().is_ok());
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["traceId"], header.as_str());
    assert_eq!(body["message"], "login required");
}

#[rstest]
#[case("/health/live", StatusCode::OK)]
#[case("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
#[case("/api/v1/users", StatusCode::OK)]
#[case("/api/v1/users/7", StatusCode::OK)]
#[case("/api/v1/unknown", StatusCode::NOT_FOUND)]
#[actix_rt::test]
async fn routes_are_mounted(#[case] uri: &str, #[case] expected: StatusCode) {
    let deployment = Deployment::new();
    let app = deployment.start().await;

    let reply = send(&app, "GET", uri, None, None).await;

    assert_eq!(reply.status, expected, "{uri}");
}

#[rstest]
#[actix_rt::test]
async fn logout_clears_the_cookie_session() {
    let deployment = Deployment::new();
    let app = deployment.start().await;
    let (cookie, _) = support::login(&app, "admin", "admin123", Some("admin")).await;

    let logout = send(&app, "POST", "/api/v1/logout", Some(&cookie), None).await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    let after = send(&app, "GET", "/api/v1/dashboard", logout.cookie.as_ref(), None).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);
}
