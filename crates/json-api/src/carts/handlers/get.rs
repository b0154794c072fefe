//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_status_error, models::CartResponse, session::cart_owner},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart. Shoppers who have not added anything yet get an empty cart.
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Current cart"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = cart_owner(depot)?;

    let cart = state
        .app
        .carts
        .get_cart(owner)
        .await
        .map_err(into_status_error)?;

    let response = match cart {
        Some(cart) => cart.into(),
        None => CartResponse::empty(&state.app.pricing).or_500("failed to price empty cart")?,
    };

    Ok(Json(response))
}
