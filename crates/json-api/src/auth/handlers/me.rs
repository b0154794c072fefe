//! Current User Handler

use salvo::prelude::*;

use crate::{extensions::*, users::models::UserResponse};

/// Current User Handler
///
/// Returns the account behind the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed-in user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let user = depot.user_or_401()?.clone();

    Ok(Json(user.into()))
}
