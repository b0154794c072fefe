//! Get Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use emporium_app::domain::orders::models::OrderViewer;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Get Order Handler
///
/// Customers only see their own orders; admins see all of them.
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let viewer = OrderViewer::from(depot.user_or_401()?);

    let order = state
        .app
        .orders
        .get_order(uuid.into_inner().into(), viewer)
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::{
        orders::{OrdersServiceError, models::OrderUuid},
        users::models::Role,
    };
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{
        Mocks, TEST_USER_UUID, bearer, make_order, make_user, service, signed_in,
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("orders/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_owner_sees_order() -> TestResult {
        let uuid = OrderUuid::new();

        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::User));

        mocks
            .orders
            .expect_get_order()
            .once()
            .withf(move |order, viewer| {
                *order == uuid
                    && *viewer
                        == OrderViewer {
                            user: TEST_USER_UUID,
                            role: Role::User,
                        }
            })
            .return_once(move |_, _| Ok(make_order(uuid)));

        let response: OrderResponse = TestClient::get(format!("http://example.com/orders/{uuid}"))
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.payment_method, "PayPal");

        Ok(())
    }

    #[tokio::test]
    async fn test_hidden_order_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::User));

        mocks
            .orders
            .expect_get_order()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/orders/{}", Uuid::now_v7()))
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
