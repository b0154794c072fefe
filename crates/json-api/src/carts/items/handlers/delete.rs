//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartUpdateResponse, session::cart_owner},
    extensions::*,
    state::State,
};

/// Remove Cart Item Handler
///
/// Takes one unit of a product out of the cart, dropping the line at zero.
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartUpdateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = cart_owner(depot)?;

    let update = state
        .app
        .carts
        .remove_item(owner, product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(update.into()))
}
