//! Create Category Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use emporium_app::domain::categories::models::{CategoryUuid, NewCategory};

use crate::{
    categories::{
        errors::into_status_error,
        models::{CategoryRequest, CategoryResponse},
    },
    extensions::*,
    state::State,
};

impl From<CategoryRequest> for NewCategory {
    fn from(request: CategoryRequest) -> Self {
        NewCategory {
            uuid: CategoryUuid::new(),
            name: request.name,
            slug: request.slug,
        }
    }
}

/// Create Category Handler
#[endpoint(
    tags("admin"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category slug is already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let category = state
        .app
        .categories
        .create_category(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/categories/{}", category.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(category.into()))
}
