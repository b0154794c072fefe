//! Sign Up Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use emporium_app::domain::users::{
    models::{NewUser, Role, UserUuid},
    password::Password,
};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Sign Up Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignUpRequest {
    /// At least 3 characters
    pub name: String,

    pub email: String,

    /// At least 6 characters
    pub password: String,
}

impl From<SignUpRequest> for NewUser {
    fn from(request: SignUpRequest) -> Self {
        NewUser {
            uuid: UserUuid::new(),
            name: request.name,
            email: request.email,
            password: Password::new(request.password),
            role: Role::User,
        }
    }
}

/// Sign Up Handler
///
/// Registers a customer account. Sign in separately to obtain a session token.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::CONFLICT, description = "Email address is already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<SignUpRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .sign_up(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(user.into()))
}
