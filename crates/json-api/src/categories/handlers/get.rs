//! Get Category Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    categories::{errors::into_status_error, models::CategoryDetailResponse},
    extensions::*,
    specifications,
    state::State,
    subcategories,
};

/// Get Category Handler
///
/// Looks a category up by slug, together with its subcategories and specifications.
#[endpoint(
    tags("catalog"),
    summary = "Get Category",
    responses(
        (status_code = StatusCode::OK, description = "Category found"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
    ),
)]
pub(crate) async fn handler(
    slug: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CategoryDetailResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .get_category_by_slug(&slug.into_inner())
        .await
        .map_err(into_status_error)?;

    let subcategories = state
        .app
        .subcategories
        .list_subcategories(category.uuid)
        .await
        .map_err(subcategories::errors::into_status_error)?;

    let specifications = state
        .app
        .specifications
        .list_specifications(category.uuid)
        .await
        .map_err(specifications::errors::into_status_error)?;

    Ok(Json(CategoryDetailResponse::new(
        category,
        subcategories,
        specifications,
    )))
}
