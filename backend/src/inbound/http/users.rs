//! Fixed user directory kept for API clients that still call it.
//!
//! ```text
//! GET /api/v1/users
//! GET /api/v1/users/{id}
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Id and display name of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: String,
    pub name: String,
}

impl UserSummary {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The two fixed directory entries.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses((status = 200, description = "Users", body = [UserSummary])),
    tags = ["users"],
    operation_id = "listUsers",
    security([])
)]
#[get("/users")]
pub async fn list_users() -> web::Json<Vec<UserSummary>> {
    web::Json(vec![
        UserSummary::new("1", "Alice"),
        UserSummary::new("2", "Bob"),
    ])
}

/// Echo any id with a generated name.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User id")),
    responses((status = 200, description = "User", body = UserSummary)),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(path: web::Path<String>) -> web::Json<UserSummary> {
    let id = path.into_inner();
    let name = format!("User {id}");
    web::Json(UserSummary::new(id, name))
}
