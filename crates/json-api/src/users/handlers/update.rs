//! Update User Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::users::models::{Role, UserUpdate};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Update User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateUserRequest {
    pub name: String,

    /// `user` or `admin`
    pub role: String,
}

/// Update User Handler
///
/// Renames a user or changes their role.
#[endpoint(
    tags("admin"),
    summary = "Update User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
#[tracing::instrument(name = "users.update", skip(uuid, json, depot), err)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateUserRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let role = request.role.parse::<Role>().or_400()?;

    let user = state
        .app
        .users
        .update_user(
            uuid.into_inner().into(),
            UserUpdate {
                name: request.name,
                role,
            },
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(user = %user.uuid, role = %user.role, "updated user");

    Ok(Json(user.into()))
}
