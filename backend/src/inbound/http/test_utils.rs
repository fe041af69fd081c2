//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, test, web};
use serde_json::json;

use crate::domain::ports::SequentialCredentialGenerator;
use crate::domain::{Period, RecordStore};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::blob_store::InMemoryBlobStore;
use crate::test_support::{MutableClock, contribution, member, syndicate, training};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh key per invocation.
/// - Names the cookie `session` and disables the `Secure` flag for plain
///   HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `res`.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// `POST /api/v1/login` for the given identity.
pub fn login_request(username: &str, password: &str, role: Option<&str>) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({ "username": username, "password": password, "role": role }))
}

/// Store and state seeded with two syndicates.
///
/// - `s7` "Local 7", leader `L7`/`p7`: members `m1` (login `member_jane01`)
///   and `m2`, training `t7` with one seat.
/// - `s9` "Local 9", leader `L9`/`p9`: member `m3`, training `t9`.
/// - Shared training `open` with two seats.
pub struct TestBackend {
    pub store: RecordStore,
    pub state: HttpState,
}

impl TestBackend {
    pub async fn seeded() -> Self {
        let store = RecordStore::new(Arc::new(InMemoryBlobStore::new()));
        store
            .save(&[
                syndicate("s7", "Local 7", "L7", "p7"),
                syndicate("s9", "Local 9", "L9", "p9"),
            ])
            .await
            .expect("seed syndicates");
        store
            .save(&[
                member("m1", "Jane Doe", "s7", Some("member_jane01")),
                member("m2", "John Roe", "s7", None),
                member("m3", "Ann Poe", "s9", Some("member_ann003")),
            ])
            .await
            .expect("seed members");
        store
            .save(&[
                contribution("c1", "m1", 5000, Period::Jan, 2024),
                contribution("c2", "m3", 7000, Period::Jun, 2024),
            ])
            .await
            .expect("seed contributions");
        store
            .save(&[
                training("open", None, 2),
                training("t7", Some("s7"), 1),
                training("t9", Some("s9"), 5),
            ])
            .await
            .expect("seed trainings");
        let state = HttpState::from_record_store(
            store.clone(),
            Arc::new(MutableClock::fixture()),
            Arc::new(SequentialCredentialGenerator::default()),
        );
        Self { store, state }
    }
}

/// App exposing the full `/api/v1` surface over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(
            web::scope("/api/v1")
                .wrap(test_session_middleware())
                .configure(configure_api),
        )
}
