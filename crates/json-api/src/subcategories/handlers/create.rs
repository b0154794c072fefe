//! Create Subcategory Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use emporium_app::domain::subcategories::models::{NewSubcategory, SubcategoryUuid};

use crate::{
    extensions::*,
    state::State,
    subcategories::{
        errors::into_status_error,
        models::{SubcategoryRequest, SubcategoryResponse},
    },
};

/// Create Subcategory Handler
#[endpoint(
    tags("admin"),
    summary = "Create Subcategory",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Subcategory created"),
        (status_code = StatusCode::CONFLICT, description = "Slug taken in this category"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown category or bad payload"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<SubcategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SubcategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let subcategory = state
        .app
        .subcategories
        .create_subcategory(NewSubcategory {
            uuid: SubcategoryUuid::new(),
            category_uuid: uuid.into_inner().into(),
            name: request.name,
            slug: request.slug,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(subcategory.into()))
}
