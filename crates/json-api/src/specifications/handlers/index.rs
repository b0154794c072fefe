//! Specification Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    specifications::{
        errors::into_status_error,
        models::{SpecificationResponse, SpecificationsResponse},
    },
    state::State,
};

/// Specification Index Handler
///
/// Lists the specifications defined for one category.
#[endpoint(
    tags("admin"),
    summary = "List Specifications",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    category: QueryParam<Uuid, true>,
    depot: &mut Depot,
) -> Result<Json<SpecificationsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let specifications = state
        .app
        .specifications
        .list_specifications(category.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SpecificationsResponse {
        specifications: specifications
            .into_iter()
            .map(SpecificationResponse::from)
            .collect(),
    }))
}
