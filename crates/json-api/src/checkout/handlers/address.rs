//! Shipping Address Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{AddressBody, UserResponse},
    },
};

/// Shipping Address Handler
///
/// Stores the address used for the caller's next order.
#[endpoint(
    tags("checkout"),
    summary = "Save Shipping Address",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Address saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid address"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddressBody>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?.uuid;

    let user = state
        .app
        .users
        .update_address(user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
