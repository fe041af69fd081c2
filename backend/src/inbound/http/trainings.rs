//! Training catalogue endpoints.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::ports::TrainingView;
use crate::domain::{Error, NewTraining, TrainingRegistration};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Body of `POST /trainings`. Dates are local `YYYY-MM-DDTHH:MM` values.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrainingRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[schema(example = "2024-07-01T09:00")]
    pub start_date: String,
    #[schema(example = "2024-07-01T17:00")]
    pub end_date: String,
    pub location: String,
    #[serde(default)]
    pub capacity: u32,
}

impl TryFrom<CreateTrainingRequest> for NewTraining {
    type Error = Error;

    fn try_from(value: CreateTrainingRequest) -> Result<Self, Self::Error> {
        Ok(Self::try_from_parts(
            &value.title,
            &value.description,
            &value.start_date,
            &value.end_date,
            &value.location,
            value.capacity,
        )?)
    }
}

/// Body of `POST /trainings/{id}/registrations`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterMemberRequest {
    pub member_id: String,
}

/// Trainings visible to the caller with their current status.
#[utoipa::path(
    get,
    path = "/api/v1/trainings",
    responses(
        (status = 200, description = "Trainings", body = [TrainingView]),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Member sessions have no training view", body = Error)
    ),
    tags = ["trainings"],
    operation_id = "listTrainings"
)]
#[get("/trainings")]
pub async fn list_trainings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<TrainingView>>> {
    let caller = session.require()?;
    Ok(web::Json(state.trainings.list(&caller).await?))
}

/// Schedule a training; leaders' trainings belong to their syndicate.
#[utoipa::path(
    post,
    path = "/api/v1/trainings",
    request_body = CreateTrainingRequest,
    responses(
        (status = 201, description = "Created", body = TrainingView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["trainings"],
    operation_id = "createTraining"
)]
#[post("/trainings")]
pub async fn create_training(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTrainingRequest>,
) -> ApiResult<HttpResponse> {
    let caller = session.require()?;
    let input = NewTraining::try_from(payload.into_inner())?;
    let created = state.trainings.create(&caller, input).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Seat a member in a training.
#[utoipa::path(
    post,
    path = "/api/v1/trainings/{id}/registrations",
    params(("id" = String, Path, description = "Training id")),
    request_body = RegisterMemberRequest,
    responses(
        (status = 200, description = "Registered", body = TrainingView),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Training or member unknown or out of scope", body = Error),
        (status = 409, description = "Already registered or full", body = Error)
    ),
    tags = ["trainings"],
    operation_id = "registerForTraining"
)]
#[post("/trainings/{id}/registrations")]
pub async fn register_for_training(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<RegisterMemberRequest>,
) -> ApiResult<web::Json<TrainingView>> {
    let caller = session.require()?;
    let registration = TrainingRegistration::try_from_parts(&path.into_inner(), &payload.member_id)?;
    let seated = state.trainings.register_member(&caller, registration).await?;
    Ok(web::Json(seated))
}
