//! Subcategory Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    subcategories::{
        errors::into_status_error,
        models::{SubcategoriesResponse, SubcategoryResponse},
    },
};

/// Subcategory Index Handler
#[endpoint(
    tags("admin"),
    summary = "List Subcategories",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<SubcategoriesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let subcategories = state
        .app
        .subcategories
        .list_subcategories(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(SubcategoriesResponse {
        subcategories: subcategories
            .into_iter()
            .map(SubcategoryResponse::from)
            .collect(),
    }))
}
