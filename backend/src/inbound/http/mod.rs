//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod contributions;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod members;
pub mod session;
pub mod state;
pub mod syndicates;
#[cfg(test)]
pub mod test_utils;
pub mod trainings;
pub mod users;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal paths are registered before their `{id}` siblings so
/// `/syndicates/unassigned-members` and `/contributions/monthly` are not
/// captured as identifiers.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(syndicates::list_syndicates)
        .service(syndicates::create_syndicate)
        .service(syndicates::unassigned_members)
        .service(syndicates::syndicate_details)
        .service(syndicates::update_syndicate)
        .service(syndicates::assign_leader)
        .service(members::list_members)
        .service(members::register_member)
        .service(members::member_details)
        .service(members::update_member)
        .service(contributions::list_contributions)
        .service(contributions::record_contribution)
        .service(contributions::monthly_contributions)
        .service(trainings::list_trainings)
        .service(trainings::create_training)
        .service(trainings::register_for_training)
        .service(dashboard::dashboard)
        .service(users::list_users)
        .service(users::get_user);
}
