//! Create Brand Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    brands::{
        errors::into_status_error,
        models::{BrandRequest, BrandResponse},
    },
    extensions::*,
    state::State,
};

/// Create Brand Handler
#[endpoint(
    tags("admin"),
    summary = "Create Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Brand created"),
        (status_code = StatusCode::CONFLICT, description = "Brand slug is already taken"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<BrandRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brand = state
        .app
        .brands
        .create_brand(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/admin/brands/{}", brand.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(brand.into()))
}
