//! Update Specification Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use emporium::specifications::SpecificationKind;
use emporium_app::domain::specifications::models::SpecificationUpdate;

use crate::{
    extensions::*,
    specifications::{
        errors::into_status_error,
        models::{SpecificationResponse, UpdateSpecificationRequest},
    },
    state::State,
};

/// Update Specification Handler
///
/// The kind can only change while no product carries a value for the specification.
#[endpoint(
    tags("admin"),
    summary = "Update Specification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Specification updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Specification not found"),
        (status_code = StatusCode::CONFLICT, description = "Kind is fixed once values exist"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<UpdateSpecificationRequest>,
    depot: &mut Depot,
) -> Result<Json<SpecificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let kind: SpecificationKind = request.kind.parse().or_400()?;

    let specification = state
        .app
        .specifications
        .update_specification(
            uuid.into_inner().into(),
            SpecificationUpdate {
                name: request.name,
                kind,
                unit: request.unit,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(specification.into()))
}
