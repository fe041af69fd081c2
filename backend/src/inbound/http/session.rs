//! Cookie-backed session helpers.
//!
//! Wraps the Actix session so handlers only deal with the domain
//! [`Session`]: persist it after login, require it on protected routes and
//! purge it on logout.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Session};

pub(crate) const SESSION_KEY: &str = "session";

/// Newtype over the Actix cookie session.
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Store `session` in the cookie, replacing any previous identity.
    pub fn persist(&self, session: &Session) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_KEY, session)
            .map_err(|err| Error::internal(format!("failed to persist session: {err}")))
    }

    /// Session carried by the cookie, if any.
    ///
    /// A cookie that no longer decodes into a session reads as logged out.
    pub fn current(&self) -> Result<Option<Session>, Error> {
        match self.0.get::<Session>(SESSION_KEY) {
            Ok(session) => Ok(session),
            Err(err) => {
                warn!(error = %err, "undecodable session cookie ignored");
                Ok(None)
            }
        }
    }

    /// Session carried by the cookie or `401 Unauthorized`.
    pub fn require(&self) -> Result<Session, Error> {
        self.current()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop the cookie session entirely.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use super::*;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    fn leader() -> Session {
        let syndicate = crate::test_support::syndicate("s7", "Local 7", "L7", "p7");
        Session::leader(&syndicate, "L7")
    }

    #[actix_web::test]
    async fn persisted_session_is_required_back() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist(&leader())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        let current = session.require()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(current.id().to_owned()))
                    }),
                ),
        )
        .await;

        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);
        let get = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;

        assert_eq!(get.status(), StatusCode::OK);
        assert_eq!(test::read_body(get).await, "leader-s7");
    }

    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = test::init_service(App::new().wrap(test_session_middleware()).route(
            "/get",
            web::get().to(|session: SessionContext| async move {
                session.require()?;
                Ok::<_, Error>(HttpResponse::Ok())
            }),
        ))
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn foreign_payload_reads_as_logged_out() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: CookieSession| async move {
                        session.insert(SESSION_KEY, "not-a-session").expect("insert");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/get",
                    web::get().to(|session: SessionContext| async move {
                        session.require()?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set = test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);
        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/get").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
