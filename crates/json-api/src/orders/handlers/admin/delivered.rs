//! Mark Order Delivered Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Mark Order Delivered Handler
///
/// Only paid orders can be delivered.
#[endpoint(
    tags("admin"),
    summary = "Mark Order Delivered",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order marked as delivered"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is unpaid or already delivered"),
    ),
)]
#[tracing::instrument(name = "orders.delivered", skip(uuid, depot), err)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .mark_delivered(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
