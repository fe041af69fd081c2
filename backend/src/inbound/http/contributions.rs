//! Contribution ledger endpoints.
//!
//! Every role may read the ledger; only administrators and leaders record.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::ContributionsView;
use crate::domain::{Contribution, Error, MonthlyTotal, NewContribution, PaymentMethod, Period};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /contributions`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordContributionRequest {
    pub member_id: String,
    /// Positive amount; fractions are allowed.
    pub amount: f64,
    pub payment_method: PaymentMethod,
    pub period: Period,
    pub year: i32,
}

impl TryFrom<RecordContributionRequest> for NewContribution {
    type Error = Error;

    fn try_from(value: RecordContributionRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(
            &value.member_id,
            value.amount,
            value.payment_method,
            value.period,
            value.year,
        )?)
    }
}

/// Query string of `GET /contributions/monthly`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct MonthlyQuery {
    /// Calendar year; the current year when omitted.
    pub year: Option<i32>,
}

/// Scoped contributions, the members they belong to and summary figures.
#[utoipa::path(
    get,
    path = "/api/v1/contributions",
    responses(
        (status = 200, description = "Contribution ledger", body = ContributionsView),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["contributions"],
    operation_id = "listContributions"
)]
#[get("/contributions")]
pub async fn list_contributions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ContributionsView>> {
    let caller = session.require()?;
    Ok(web::Json(state.contributions.overview(&caller).await?))
}

/// Record one payment for a member in scope.
#[utoipa::path(
    post,
    path = "/api/v1/contributions",
    request_body = RecordContributionRequest,
    responses(
        (status = 201, description = "Recorded", body = Contribution),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Member sessions cannot record", body = Error),
        (status = 404, description = "Member unknown or out of scope", body = Error),
        (status = 409, description = "Period already paid", body = Error)
    ),
    tags = ["contributions"],
    operation_id = "recordContribution"
)]
#[post("/contributions")]
pub async fn record_contribution(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RecordContributionRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require()?;
    let input = NewContribution::try_from(payload.into_inner())?;
    let recorded = state.contributions.record(&caller, input).await?;
    Ok(HttpResponse::Created().json(recorded))
}

/// Twelve monthly totals for one year.
#[utoipa::path(
    get,
    path = "/api/v1/contributions/monthly",
    params(MonthlyQuery),
    responses(
        (status = 200, description = "Monthly totals", body = [MonthlyTotal]),
        (status = 401, description = "Login required", body = Error)
    ),
    tags = ["contributions"],
    operation_id = "monthlyContributions"
)]
#[get("/contributions/monthly")]
pub async fn monthly_contributions(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<MonthlyQuery>,
) -> ApiResult<web::Json<Vec<MonthlyTotal>>> {
    let caller = session.require()?;
    let series = state.contributions.monthly(&caller, query.year).await?;
    Ok(web::Json(series))
}
