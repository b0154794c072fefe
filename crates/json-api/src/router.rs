//! App Router

use salvo::Router;

use crate::{
    auth::{
        self,
        middleware::{identify, require_admin, require_user},
    },
    brands, carts,
    carts::session::session_cart,
    categories, checkout, features, orders, products, specifications, subcategories, users,
};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(identify)
        .push(catalog_router())
        .push(auth_router())
        .push(cart_router())
        .push(checkout_router())
        .push(orders_router())
        .push(admin_router())
}

fn catalog_router() -> Router {
    Router::new()
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .push(Router::with_path("{slug}").get(categories::get::handler)),
        )
        .push(Router::with_path("brands").get(brands::index::handler))
        .push(Router::with_path("features").get(features::index::handler))
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("featured").get(products::featured::handler))
                .push(Router::with_path("{slug}").get(products::get::handler)),
        )
}

fn auth_router() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("sign-up").post(auth::sign_up::handler))
        .push(
            Router::with_path("sign-in")
                .hoop(session_cart)
                .post(auth::sign_in::handler),
        )
        .push(Router::with_path("sign-out").post(auth::sign_out::handler))
        .push(
            Router::with_path("me")
                .hoop(require_user)
                .get(auth::me::handler)
                .put(auth::update_profile::handler),
        )
}

fn cart_router() -> Router {
    Router::with_path("cart")
        .hoop(session_cart)
        .get(carts::get::handler)
        .push(
            Router::with_path("items")
                .post(carts::items::create::handler)
                .push(Router::with_path("{product}").delete(carts::items::delete::handler)),
        )
}

fn checkout_router() -> Router {
    Router::with_path("checkout")
        .hoop(session_cart)
        .get(checkout::get::handler)
        .push(
            Router::new()
                .hoop(require_user)
                .push(Router::with_path("address").put(checkout::address::handler))
                .push(Router::with_path("payment-method").put(checkout::payment_method::handler)),
        )
}

fn orders_router() -> Router {
    Router::with_path("orders")
        .hoop(require_user)
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(Router::with_path("{uuid}").get(orders::get::handler))
}

fn admin_router() -> Router {
    Router::with_path("admin")
        .hoop(require_admin)
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::admin::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(categories::admin::get::handler)
                        .put(categories::admin::update::handler)
                        .delete(categories::admin::delete::handler)
                        .push(
                            Router::with_path("subcategories")
                                .get(subcategories::index::handler)
                                .post(subcategories::create::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("subcategories/{uuid}")
                .put(subcategories::update::handler)
                .delete(subcategories::delete::handler),
        )
        .push(
            Router::with_path("brands")
                .get(brands::index::handler)
                .post(brands::admin::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(brands::admin::get::handler)
                        .put(brands::admin::update::handler)
                        .delete(brands::admin::delete::handler),
                ),
        )
        .push(
            Router::with_path("specifications")
                .get(specifications::index::handler)
                .post(specifications::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .put(specifications::update::handler)
                        .delete(specifications::delete::handler),
                ),
        )
        .push(
            Router::with_path("features")
                .get(features::index::handler)
                .post(features::admin::create::handler)
                .push(Router::with_path("{uuid}").delete(features::admin::delete::handler)),
        )
        .push(
            Router::with_path("products")
                .get(products::admin::index::handler)
                .post(products::admin::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(products::admin::get::handler)
                        .put(products::admin::update::handler)
                        .delete(products::admin::delete::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::admin::index::handler)
                .push(
                    Router::with_path("{uuid}")
                        .delete(orders::admin::delete::handler)
                        .push(Router::with_path("paid").put(orders::admin::paid::handler))
                        .push(
                            Router::with_path("delivered").put(orders::admin::delivered::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler),
                ),
        )
}

#[cfg(test)]
mod tests {
    use emporium::catalog::Paginated;
    use emporium_app::domain::users::models::Role;
    use salvo::{
        affix_state::inject,
        http::{StatusCode, header::AUTHORIZATION},
        prelude::Service,
        test::TestClient,
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, bearer, make_user, signed_in};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn test_featured_is_not_treated_as_a_slug() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .products
            .expect_list_featured_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        mocks.products.expect_get_product_by_slug().never();

        let res = TestClient::get("http://example.com/products/featured")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_orders_require_sign_in() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_my_orders().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_reject_customers() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::User));

        mocks.users.expect_list_users().never();

        let res = TestClient::get("http://example.com/admin/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_admit_admins() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::Admin));

        mocks.users.expect_list_users().once().return_once(|page| {
            Ok(Paginated {
                items: Vec::new(),
                total: 0,
                page,
            })
        });

        let res = TestClient::get("http://example.com/admin/users")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_is_open_to_guests() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_get_cart()
            .once()
            .return_once(|_| Ok(None));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(
            res.headers().contains_key(carts::session::SESSION_CART_HEADER),
            "session cart id should be echoed"
        );

        Ok(())
    }
}
