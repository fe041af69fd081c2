//! Shared helpers for HTTP integration tests.
//!
//! Each test gets the production application from
//! [`syndicate_desk::server::build_app`] over a filesystem blob store in a
//! temporary directory, a pinned clock and deterministic credentials.

#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use camino::Utf8Path;
use serde_json::Value;
use tempfile::TempDir;

use syndicate_desk::domain::RecordStore;
use syndicate_desk::domain::ports::SequentialCredentialGenerator;
use syndicate_desk::inbound::http::health::HealthState;
use syndicate_desk::inbound::http::state::HttpState;
use syndicate_desk::outbound::blob_store::FsBlobStore;
use syndicate_desk::server::{AppDependencies, SESSION_COOKIE, build_app};
use syndicate_desk::test_support::MutableClock;

/// Data directory plus the dependencies of one application instance.
pub struct Deployment {
    pub dir: TempDir,
    pub clock: Arc<MutableClock>,
    key: Key,
}

impl Deployment {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("temp data dir"),
            clock: Arc::new(MutableClock::fixture()),
            key: Key::generate(),
        }
    }

    /// Record store over the data directory.
    pub fn store(&self) -> RecordStore {
        let root = Utf8Path::from_path(self.dir.path()).expect("utf8 temp dir");
        RecordStore::new(Arc::new(FsBlobStore::open(root).expect("open data dir")))
    }

    /// Start a fresh application instance over the same directory.
    pub async fn start(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
        let http_state = HttpState::from_record_store(
            self.store(),
            self.clock.clone(),
            Arc::new(SequentialCredentialGenerator::default()),
        );
        test::init_service(build_app(AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(http_state),
            key: self.key.clone(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        }))
        .await
    }
}

/// Response status and decoded JSON body (`Null` when empty).
pub struct Reply {
    pub status: StatusCode,
    pub cookie: Option<Cookie<'static>>,
    pub body: Value,
}

/// Send one request, optionally with a session cookie and JSON body.
pub async fn send<S>(
    app: &S,
    method: &str,
    uri: &str,
    cookie: Option<&Cookie<'static>>,
    body: Option<Value>,
) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let mut req = match method {
        "GET" => test::TestRequest::get(),
        "PUT" => test::TestRequest::put(),
        _ => test::TestRequest::post(),
    }
    .uri(uri);
    if let Some(cookie) = cookie {
        req = req.cookie(cookie.clone());
    }
    if let Some(body) = body {
        req = req.set_json(body);
    }
    let res = test::call_service(app, req.to_request()).await;
    let status = res.status();
    let cookie = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply {
        status,
        cookie,
        body,
    }
}

/// Log in and return the session cookie together with the session body.
pub async fn login<S>(
    app: &S,
    username: &str,
    password: &str,
    role: Option<&str>,
) -> (Cookie<'static>, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let reply = send(
        app,
        "POST",
        "/api/v1/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password, "role": role })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "login as {username}: {}", reply.body);
    (reply.cookie.expect("session cookie"), reply.body)
}
