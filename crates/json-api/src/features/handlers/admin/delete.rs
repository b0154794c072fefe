//! Delete Feature Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, features::errors::into_status_error, state::State};

/// Delete Feature Handler
///
/// Detaches the feature from every product that lists it.
#[endpoint(
    tags("admin"),
    summary = "Delete Feature",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Feature deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Feature not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .features
        .delete_feature(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
