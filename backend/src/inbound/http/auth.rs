//! Login, logout and session lookup.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"admin123","role":"admin"}
//! GET /api/v1/session
//! POST /api/v1/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroize;

use crate::domain::{Error, FeatureArea, LoginCredentials, Role, Session};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Role selected on the login form; only `admin` changes the outcome.
    #[serde(default)]
    pub role: Option<Role>,
}

/// Active session plus the feature areas it unlocks.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(flatten)]
    pub session: Session,
    pub feature_areas: Vec<FeatureArea>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let feature_areas = session.role().feature_areas().to_vec();
        Self {
            session,
            feature_areas,
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let mut request = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&request.username, &request.password);
    request.password.zeroize();
    let active = state.login.authenticate(&credentials?, request.role).await?;
    session.persist(&active)?;
    Ok(web::Json(active.into()))
}

/// End the session for this client and in the store.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> ApiResult<HttpResponse> {
    state.login.logout().await?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}

/// Current session.
///
/// Only the caller's own cookie session is reported. The persisted
/// `current-session` blob is never handed to a client without one.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Active session", body = SessionResponse),
        (status = 401, description = "No active session", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> ApiResult<web::Json<SessionResponse>> {
    let active = session.require()?;
    Ok(web::Json(active.into()))
}
