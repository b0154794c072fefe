//! Delete Brand Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{brands::errors::into_status_error, extensions::*, state::State};

/// Delete Brand Handler
///
/// Refused while active products still reference the brand.
#[endpoint(
    tags("admin"),
    summary = "Delete Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Brand deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Brand not found"),
        (status_code = StatusCode::CONFLICT, description = "Brand still has active products"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .brands
        .delete_brand(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
