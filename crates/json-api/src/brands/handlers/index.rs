//! Brand Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    brands::{
        errors::into_status_error,
        models::{BrandResponse, BrandsResponse},
    },
    extensions::*,
    state::State,
};

/// Brand Index Handler
///
/// Returns every active brand ordered by name.
#[endpoint(tags("catalog"), summary = "List Brands")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<BrandsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brands = state
        .app
        .brands
        .list_brands()
        .await
        .map_err(into_status_error)?;

    Ok(Json(BrandsResponse {
        brands: brands.into_iter().map(BrandResponse::from).collect(),
    }))
}
