//! Payment Method Handler

use std::sync::Arc;

use emporium::checkout::PaymentMethod;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Payment Method Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentMethodRequest {
    /// `PayPal`, `Stripe` or `CashOnDelivery`
    pub payment_method: String,
}

/// Payment Method Handler
#[endpoint(
    tags("checkout"),
    summary = "Save Payment Method",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Payment method saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown payment method"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<PaymentMethodRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_401()?.uuid;
    let method = json
        .into_inner()
        .payment_method
        .parse::<PaymentMethod>()
        .or_400()?;

    let user = state
        .app
        .users
        .update_payment_method(user, method)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}
