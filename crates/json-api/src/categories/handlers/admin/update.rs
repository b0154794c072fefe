//! Update Category Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use emporium_app::domain::categories::models::CategoryUpdate;

use crate::{
    categories::{
        errors::into_status_error,
        models::{CategoryRequest, CategoryResponse},
    },
    extensions::*,
    state::State,
};

impl From<CategoryRequest> for CategoryUpdate {
    fn from(request: CategoryRequest) -> Self {
        CategoryUpdate {
            name: request.name,
            slug: request.slug,
        }
    }
}

/// Update Category Handler
#[endpoint(
    tags("admin"),
    summary = "Update Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Category updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Category not found"),
        (status_code = StatusCode::CONFLICT, description = "Category slug is already taken"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .update_category(uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(category.into()))
}
