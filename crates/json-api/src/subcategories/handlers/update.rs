//! Update Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use emporium_app::domain::subcategories::models::SubcategoryUpdate;

use crate::{
    extensions::*,
    state::State,
    subcategories::{
        errors::into_status_error,
        models::{SubcategoryRequest, SubcategoryResponse},
    },
};

/// Update Subcategory Handler
#[endpoint(
    tags("admin"),
    summary = "Update Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Subcategory updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Subcategory not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<SubcategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<SubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let subcategory = state
        .app
        .subcategories
        .update_subcategory(
            uuid.into_inner().into(),
            SubcategoryUpdate {
                name: request.name,
                slug: request.slug,
            },
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(subcategory.into()))
}
