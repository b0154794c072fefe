//! Checkout Status Handler

use std::sync::Arc;

use emporium::checkout::CheckoutState;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, session::cart_owner},
    extensions::*,
    state::State,
};

/// Checkout Status Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is reported to the client"
)]
pub(crate) struct CheckoutResponse {
    /// One of `cart`, `sign_in`, `shipping_address`, `payment_method` or `place_order`
    pub next_step: String,

    pub has_items: bool,
    pub signed_in: bool,
    pub has_address: bool,
    pub has_payment_method: bool,
}

impl From<CheckoutState> for CheckoutResponse {
    fn from(state: CheckoutState) -> Self {
        CheckoutResponse {
            next_step: state.next_step().to_string(),
            has_items: state.has_items,
            signed_in: state.signed_in,
            has_address: state.has_address,
            has_payment_method: state.has_payment_method,
        }
    }
}

/// Checkout Status Handler
///
/// Reports which checkout step the caller has to complete next.
#[endpoint(
    tags("checkout"),
    summary = "Checkout Status",
    responses(
        (status_code = StatusCode::OK, description = "Next checkout step"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CheckoutResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = cart_owner(depot)?;
    let user = depot.user();

    let has_items = state
        .app
        .carts
        .get_cart(owner)
        .await
        .map_err(into_status_error)?
        .is_some_and(|cart| !cart.items.is_empty());

    Ok(Json(
        CheckoutState {
            has_items,
            signed_in: user.is_some(),
            has_address: user.is_some_and(|user| user.address.is_some()),
            has_payment_method: user.is_some_and(|user| user.payment_method.is_some()),
        }
        .into(),
    ))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::{products::models::ProductUuid, users::models::Role};
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{
        Mocks, bearer, make_cart, make_checkout_user, make_line, make_user, service, signed_in,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("checkout").get(handler))
    }

    fn with_items(mocks: &mut Mocks) {
        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(Some(make_cart(vec![make_line(ProductUuid::new(), 1)]))));
    }

    #[tokio::test]
    async fn test_empty_cart_starts_at_cart() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_get_cart().once().return_once(|_| Ok(None));

        let response: CheckoutResponse = TestClient::get("http://example.com/checkout")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.next_step, "cart");

        Ok(())
    }

    #[tokio::test]
    async fn test_guest_with_items_must_sign_in() -> TestResult {
        let mut mocks = Mocks::default();

        with_items(&mut mocks);

        let response: CheckoutResponse = TestClient::get("http://example.com/checkout")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.next_step, "sign_in");
        assert!(response.has_items);

        Ok(())
    }

    #[tokio::test]
    async fn test_user_without_address_is_asked_for_one() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::User));
        with_items(&mut mocks);

        let response: CheckoutResponse = TestClient::get("http://example.com/checkout")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.next_step, "shipping_address");

        Ok(())
    }

    #[tokio::test]
    async fn test_ready_user_can_place_order() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_checkout_user());
        with_items(&mut mocks);

        let response: CheckoutResponse = TestClient::get("http://example.com/checkout")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.next_step, "place_order");

        Ok(())
    }
}
