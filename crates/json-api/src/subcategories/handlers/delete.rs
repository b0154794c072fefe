//! Delete Subcategory Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, subcategories::errors::into_status_error};

/// Delete Subcategory Handler
#[endpoint(
    tags("admin"),
    summary = "Delete Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Subcategory deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Subcategory not found"),
        (status_code = StatusCode::CONFLICT, description = "Subcategory still has active products"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .subcategories
        .delete_subcategory(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}
