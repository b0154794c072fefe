//! Product Search Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use emporium::catalog::{PriceRange, ProductQuery, ProductSort};

use crate::{
    extensions::*,
    products::{errors::into_status_error, models::ProductsPageResponse},
    state::State,
};

/// Product Search Handler
///
/// Filters active products by text, category slug, brand slug and a `min-max` price range in
/// cents, then sorts and paginates them.
#[endpoint(
    tags("catalog"),
    summary = "Search Products",
    responses(
        (status_code = StatusCode::OK, description = "Matching products"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed price range or sort"),
    ),
)]
#[tracing::instrument(
    name = "products.search",
    skip(q, category, brand, price, sort, page, depot),
    fields(sort = tracing::field::Empty, page = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    q: QueryParam<String, false>,
    category: QueryParam<String, false>,
    brand: QueryParam<String, false>,
    price: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<ProductsPageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let price = price
        .into_inner()
        .map(|range| range.parse::<PriceRange>())
        .transpose()
        .or_400()?;

    let sort = sort
        .into_inner()
        .map(|sort| sort.parse::<ProductSort>())
        .transpose()
        .or_400()?
        .unwrap_or_default();

    let query = ProductQuery {
        query: q.into_inner(),
        category: category.into_inner(),
        brand: brand.into_inner(),
        price,
        sort,
        page: page.into_page(),
    };

    let span = tracing::Span::current();

    span.record("sort", query.sort.as_str());
    span.record("page", query.page.number());

    let products = state
        .app
        .products
        .list_products(query)
        .await
        .map_err(into_status_error)?;

    Ok(Json(products.into()))
}
