//! Mark Order Paid Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Mark Order Paid Handler
#[endpoint(
    tags("admin"),
    summary = "Mark Order Paid",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order marked as paid"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order is already paid"),
    ),
)]
#[tracing::instrument(name = "orders.paid", skip(uuid, depot), err)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let order = state
        .app
        .orders
        .mark_paid(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}
