//! Sign In Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use emporium_app::domain::users::{models::Session, password::Password};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Sign In Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Session Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    /// Bearer token for the `Authorization` header. Only returned once.
    pub token: String,

    /// When the token stops working
    pub expires_at: String,

    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        SessionResponse {
            token: session.token,
            expires_at: session.expires_at.to_string(),
            user: session.user.into(),
        }
    }
}

/// Sign In Handler
///
/// Issues a bearer session and moves the caller's session cart onto their account.
#[endpoint(
    tags("auth"),
    summary = "Sign In",
    responses(
        (status_code = StatusCode::OK, description = "Signed in"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Invalid email or password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "auth.sign_in", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<SignInRequest>,
    depot: &mut Depot,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let session_cart = depot.session_cart_id_or_500()?;
    let request = json.into_inner();

    let session = state
        .app
        .users
        .sign_in(&request.email, Password::new(request.password))
        .await
        .map_err(into_status_error)?;

    if let Err(source) = state
        .app
        .carts
        .claim_session_cart(session_cart, session.user.uuid)
        .await
    {
        warn!(user = %session.user.uuid, "failed to claim session cart: {source}");
    }

    Ok(Json(session.into()))
}
