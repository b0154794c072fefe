//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{errors::into_status_error, models::CartUpdateResponse, session::cart_owner},
    extensions::*,
    observability::record_cart_item_added,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_uuid: Uuid,
}

/// Add Cart Item Handler
///
/// Adds one unit of a product, creating the cart on first use.
#[endpoint(
    tags("cart"),
    summary = "Add Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Item added"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "cart.items.create",
    skip(json, depot),
    fields(product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartUpdateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = cart_owner(depot)?;
    let product = json.into_inner().product_uuid;

    tracing::Span::current().record("product_uuid", tracing::field::display(product));

    let update = state
        .app
        .carts
        .add_item(owner, product.into())
        .await
        .map_err(into_status_error)?;

    record_cart_item_added();

    Ok(Json(update.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::{
        carts::{CartsServiceError, models::CartUpdate},
        products::models::ProductUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_cart, make_line, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("cart/items").post(handler))
    }

    #[tokio::test]
    async fn test_add_item_returns_message_and_cart() -> TestResult {
        let product = ProductUuid::new();

        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .withf(move |owner, uuid| owner.user.is_none() && *uuid == product)
            .return_once(move |_, _| {
                Ok(CartUpdate {
                    cart: make_cart(vec![make_line(product, 1)]),
                    message: "Ridge Tent added to cart".to_string(),
                })
            });

        let response: CartUpdateResponse = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": product.into_uuid() }))
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.message, "Ridge Tent added to cart");
        assert_eq!(response.cart.items.len(), 1, "expected one line");

        Ok(())
    }

    #[tokio::test]
    async fn test_out_of_stock_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotEnoughStock));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7() }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_product_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_add_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::ProductNotFound));

        let res = TestClient::post("http://example.com/cart/items")
            .json(&json!({ "product_uuid": Uuid::now_v7() }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
