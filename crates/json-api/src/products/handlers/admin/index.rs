//! Admin Product Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use emporium::catalog::ProductQuery;

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductsPageResponse},
    state::State,
};

/// Admin Product Index Handler
///
/// Returns one page of active products, newest first.
#[endpoint(
    tags("admin"),
    summary = "List Products",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let products = state
        .app
        .products
        .list_products(ProductQuery {
            page: page.into_page(),
            ..ProductQuery::default()
        })
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
