//! Orders service.

use async_trait::async_trait;
use emporium::{
    cart::CartLines,
    catalog::{Page, Paginated},
    checkout::{CheckoutState, CheckoutStep},
    pricing::PricingPolicy,
};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    database::{Db, amount_to_i64},
    domain::{
        carts::repositories::{PgCartItemsRepository, PgCartsRepository},
        orders::{
            errors::OrdersServiceError,
            models::{Order, OrderUuid, OrderViewer},
            repository::PgOrdersRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    policy: PricingPolicy,
    repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_policy(db, PricingPolicy::default())
    }

    #[must_use]
    pub fn with_policy(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            policy,
            repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    async fn attach_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &mut [Order],
    ) -> Result<(), OrdersServiceError> {
        let uuids: Vec<Uuid> = orders.iter().map(|order| order.uuid.into_uuid()).collect();

        let mut items = self.repository.list_order_items(tx, &uuids).await?;

        for order in orders.iter_mut() {
            order.items = items.remove(&order.uuid.into_uuid()).unwrap_or_default();
        }

        Ok(())
    }
}

fn page_bounds(page: Page) -> Result<(i64, i64), OrdersServiceError> {
    Ok((
        amount_to_i64(page.limit(), "limit")?,
        amount_to_i64(page.offset(), "offset")?,
    ))
}

#[async_trait]
impl OrdersService for PgOrdersService {
    #[tracing::instrument(name = "orders.service.place_order", skip(self), err)]
    async fn place_order(&self, user: UserUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let details = self.repository.get_checkout_details(&mut tx, user).await?;
        let cart = self.carts_repository.find_user_cart(&mut tx, user).await?;

        let lines = match &cart {
            Some(cart) => self.items_repository.list_cart_items(&mut tx, cart.uuid).await?,
            None => CartLines::new(),
        };

        let state = CheckoutState {
            has_items: !lines.is_empty(),
            signed_in: true,
            has_address: details.address.is_some(),
            has_payment_method: details.payment_method.is_some(),
        };

        let step = state.next_step();

        let (CheckoutStep::PlaceOrder, Some(cart), Some(address), Some(payment_method)) =
            (step, cart, details.address, details.payment_method)
        else {
            return Err(OrdersServiceError::CheckoutIncomplete(step));
        };

        let prices = lines.price(&self.policy)?;

        let decremented = self
            .repository
            .decrement_stock(&mut tx, lines.as_slice())
            .await?;

        if decremented < u64::try_from(lines.len()).unwrap_or(u64::MAX) {
            warn!(%user, "not enough stock to place order");

            return Err(OrdersServiceError::NotEnoughStock);
        }

        let mut order = self
            .repository
            .create_order(
                &mut tx,
                OrderUuid::new(),
                user,
                &address,
                payment_method,
                &prices,
            )
            .await?;

        self.repository
            .create_order_items(&mut tx, order.uuid, lines.as_slice())
            .await?;

        let empty = CartLines::new();

        self.items_repository
            .replace_cart_items(&mut tx, cart.uuid, &empty)
            .await?;
        self.carts_repository
            .update_cart_prices(&mut tx, cart.uuid, &empty.price(&self.policy)?)
            .await?;

        tx.commit().await?;

        order.items = lines.into();

        info!(order = %order.uuid, %user, total = order.prices.total_price, "placed order");

        Ok(order)
    }

    async fn get_order(
        &self,
        order: OrderUuid,
        viewer: OrderViewer,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self.repository.get_order(&mut tx, order).await?;

        if !viewer.can_view(&order) {
            return Err(OrdersServiceError::NotFound);
        }

        self.attach_items(&mut tx, std::slice::from_mut(&mut order))
            .await?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_my_orders(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Paginated<Order>, OrdersServiceError> {
        let (limit, offset) = page_bounds(page)?;

        let mut tx = self.db.begin().await?;

        let (mut orders, total) = self
            .repository
            .list_user_orders(&mut tx, user, limit, offset)
            .await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: orders,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    async fn list_orders(&self, page: Page) -> Result<Paginated<Order>, OrdersServiceError> {
        let (limit, offset) = page_bounds(page)?;

        let mut tx = self.db.begin().await?;

        let (mut orders, total) = self.repository.list_orders(&mut tx, limit, offset).await?;

        self.attach_items(&mut tx, &mut orders).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: orders,
            total: u64::try_from(total).unwrap_or_default(),
            page,
        })
    }

    async fn mark_paid(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if current.is_paid() {
            return Err(OrdersServiceError::AlreadyPaid);
        }

        let mut updated = self.repository.mark_order_paid(&mut tx, order).await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        info!(%order, "marked order paid");

        Ok(updated)
    }

    async fn mark_delivered(&self, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_order(&mut tx, order).await?;

        if !current.is_paid() {
            return Err(OrdersServiceError::NotPaid);
        }

        if current.is_delivered() {
            return Err(OrdersServiceError::AlreadyDelivered);
        }

        let mut updated = self.repository.mark_order_delivered(&mut tx, order).await?;

        self.attach_items(&mut tx, std::slice::from_mut(&mut updated))
            .await?;

        tx.commit().await?;

        info!(%order, "marked order delivered");

        Ok(updated)
    }

    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_order(&mut tx, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%order, "deleted order");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into an order, taking the items out of stock.
    async fn place_order(&self, user: UserUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve an order the viewer owns, or any order for admins.
    async fn get_order(
        &self,
        order: OrderUuid,
        viewer: OrderViewer,
    ) -> Result<Order, OrdersServiceError>;

    /// Page through a user's own orders, newest first.
    async fn list_my_orders(
        &self,
        user: UserUuid,
        page: Page,
    ) -> Result<Paginated<Order>, OrdersServiceError>;

    /// Page through every order, newest first.
    async fn list_orders(&self, page: Page) -> Result<Paginated<Order>, OrdersServiceError>;

    /// Record payment for an order.
    async fn mark_paid(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Record delivery of a paid order.
    async fn mark_delivered(&self, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Delete an order.
    async fn delete_order(&self, order: OrderUuid) -> Result<(), OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use emporium::checkout::PaymentMethod;
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartsService, models::CartOwner},
            products::ProductsService,
            users::{UsersService, models::Role},
        },
        test::{TestContext, helpers},
    };

    use super::*;

    #[test]
    fn viewers_see_their_own_orders_and_admins_see_all() {
        let owner = UserUuid::new();
        let order = Order {
            uuid: OrderUuid::new(),
            user_uuid: Some(owner),
            shipping_address: helpers::shipping_address(),
            payment_method: PaymentMethod::PayPal,
            items: Vec::new(),
            prices: emporium::pricing::CartPrices::default(),
            paid_at: None,
            delivered_at: None,
            created_at: jiff::Timestamp::UNIX_EPOCH,
            updated_at: jiff::Timestamp::UNIX_EPOCH,
        };

        let me = OrderViewer {
            user: owner,
            role: Role::User,
        };
        let stranger = OrderViewer {
            user: UserUuid::new(),
            role: Role::User,
        };
        let admin = OrderViewer {
            user: UserUuid::new(),
            role: Role::Admin,
        };

        assert!(me.can_view(&order), "owner should see the order");
        assert!(!stranger.can_view(&order), "stranger must not see the order");
        assert!(admin.can_view(&order), "admin should see the order");
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn place_order_requires_items_address_and_payment_method() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;

        let result = ctx.orders.place_order(user.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::CheckoutIncomplete(CheckoutStep::Cart))),
            "expected the cart step, got {result:?}"
        );

        ctx.carts
            .add_item(CartOwner::user(Uuid::now_v7(), user.uuid), tent.uuid)
            .await?;

        let result = ctx.orders.place_order(user.uuid).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::CheckoutIncomplete(CheckoutStep::ShippingAddress))
            ),
            "expected the address step, got {result:?}"
        );

        ctx.users
            .update_address(user.uuid, helpers::shipping_address())
            .await?;

        let result = ctx.orders.place_order(user.uuid).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::CheckoutIncomplete(CheckoutStep::PaymentMethod))
            ),
            "expected the payment method step, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn place_order_snapshots_cart_and_takes_stock() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_checkout_user(&ctx).await?;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;
        let owner = CartOwner::user(Uuid::now_v7(), user.uuid);

        ctx.carts.add_item(owner, tent.uuid).await?;
        let cart = ctx.carts.add_item(owner, tent.uuid).await?.cart;

        let order = ctx.orders.place_order(user.uuid).await?;

        assert_eq!(order.items, Vec::from(cart.items));
        assert_eq!(order.prices, cart.prices);
        assert_eq!(order.user_uuid, Some(user.uuid));
        assert!(!order.is_paid(), "new orders are unpaid");

        let product = ctx.products.get_product(tent.uuid).await?;

        assert_eq!(product.stock, 1);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart kept")?;

        assert!(cart.items.is_empty(), "cart should be cleared");

        let fetched = ctx
            .orders
            .get_order(order.uuid, OrderViewer::from(&user))
            .await?;

        assert_eq!(fetched, order);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn place_order_fails_when_stock_ran_out() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_checkout_user(&ctx).await?;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 1).await?;
        let owner = CartOwner::user(Uuid::now_v7(), user.uuid);

        ctx.carts.add_item(owner, tent.uuid).await?;
        helpers::set_stock(&ctx, tent.uuid, 0).await?;

        let result = ctx.orders.place_order(user.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotEnoughStock)),
            "expected NotEnoughStock, got {result:?}"
        );

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart kept")?;

        assert_eq!(cart.items.len(), 1, "cart untouched after failure");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn other_users_cannot_see_an_order() -> TestResult {
        let ctx = TestContext::new().await;
        let order = helpers::place_order(&ctx).await?;
        let stranger = helpers::create_user(&ctx, "Alan Turing", "alan@example.com").await?;

        let result = ctx
            .orders
            .get_order(order.uuid, OrderViewer::from(&stranger))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let admin = OrderViewer {
            user: stranger.uuid,
            role: Role::Admin,
        };

        assert_eq!(ctx.orders.get_order(order.uuid, admin).await?.uuid, order.uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn delivery_requires_payment() -> TestResult {
        let ctx = TestContext::new().await;
        let order = helpers::place_order(&ctx).await?;

        let result = ctx.orders.mark_delivered(order.uuid).await;

        assert!(
            matches!(result, Err(OrdersServiceError::NotPaid)),
            "expected NotPaid, got {result:?}"
        );

        let paid = ctx.orders.mark_paid(order.uuid).await?;

        assert!(paid.is_paid(), "expected paid");

        let again = ctx.orders.mark_paid(order.uuid).await;

        assert!(
            matches!(again, Err(OrdersServiceError::AlreadyPaid)),
            "expected AlreadyPaid, got {again:?}"
        );

        let delivered = ctx.orders.mark_delivered(order.uuid).await?;

        assert!(delivered.is_delivered(), "expected delivered");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn orders_are_listed_per_user_and_for_admins() -> TestResult {
        let ctx = TestContext::new().await;
        let order = helpers::place_order(&ctx).await?;
        let owner = order.user_uuid.ok_or("order has an owner")?;
        let stranger = helpers::create_user(&ctx, "Alan Turing", "alan@example.com").await?;

        let mine = ctx.orders.list_my_orders(owner, Page::default()).await?;
        let theirs = ctx
            .orders
            .list_my_orders(stranger.uuid, Page::default())
            .await?;
        let all = ctx.orders.list_orders(Page::default()).await?;

        assert_eq!(mine.total, 1);
        assert_eq!(theirs.total, 0);
        assert_eq!(all.items, vec![order]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn delete_order_removes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let order = helpers::place_order(&ctx).await?;

        ctx.orders.delete_order(order.uuid).await?;

        let again = ctx.orders.delete_order(order.uuid).await;

        assert!(
            matches!(again, Err(OrdersServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }
}
