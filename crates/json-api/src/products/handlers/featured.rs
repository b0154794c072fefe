//! Featured Products Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use emporium::catalog::MAX_PAGE_SIZE;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        models::{ProductResponse, ProductsResponse},
    },
    state::State,
};

const DEFAULT_FEATURED_LIMIT: u32 = 8;

/// Featured Products Handler
///
/// Returns the newest featured products, eight unless `limit` says otherwise.
#[endpoint(tags("catalog"), summary = "Featured Products")]
pub(crate) async fn handler(
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let limit = limit
        .into_inner()
        .unwrap_or(DEFAULT_FEATURED_LIMIT)
        .clamp(1, MAX_PAGE_SIZE);

    let products = state
        .app
        .products
        .list_featured_products(limit)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductsResponse {
        products: products.into_iter().map(ProductResponse::from).collect(),
    }))
}
