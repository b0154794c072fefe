//! Carts service.

use async_trait::async_trait;
use emporium::{cart::CartLines, pricing::PricingPolicy};
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartOwner, CartUpdate, CartUuid},
            repositories::{PgCartItemsRepository, PgCartsRepository},
        },
        products::models::ProductUuid,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    policy: PricingPolicy,
    carts_repository: PgCartsRepository,
    items_repository: PgCartItemsRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_policy(db, PricingPolicy::default())
    }

    #[must_use]
    pub fn with_policy(db: Db, policy: PricingPolicy) -> Self {
        Self {
            db,
            policy,
            carts_repository: PgCartsRepository::new(),
            items_repository: PgCartItemsRepository::new(),
        }
    }

    /// Find and lock the owner's cart, user cart first.
    ///
    /// A session cart found for a signed-in user is handed over to that user.
    async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Option<Cart>, CartsServiceError> {
        if let Some(user) = owner.user
            && let Some(mut cart) = self.carts_repository.find_user_cart(tx, user).await?
        {
            cart.items = self.items_repository.list_cart_items(tx, cart.uuid).await?;

            return Ok(Some(cart));
        }

        let Some(mut cart) = self
            .carts_repository
            .find_session_cart(tx, owner.session)
            .await?
        else {
            return Ok(None);
        };

        if let Some(user) = owner.user {
            self.carts_repository
                .assign_cart_user(tx, cart.uuid, user)
                .await?;

            cart.user_uuid = Some(user);
        }

        cart.items = self.items_repository.list_cart_items(tx, cart.uuid).await?;

        Ok(Some(cart))
    }

    /// Create the owner's first cart.
    ///
    /// The insert skips when another request won the race for the unique owner index, in which
    /// case the winner's committed cart is locked and returned instead.
    async fn create_or_find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        owner: CartOwner,
    ) -> Result<Cart, CartsServiceError> {
        let created = self
            .carts_repository
            .create_cart(tx, CartUuid::new(), owner.session, owner.user)
            .await?;

        match created {
            Some(cart) => Ok(cart),
            None => self
                .find_cart(tx, owner)
                .await?
                .ok_or(CartsServiceError::CartNotFound),
        }
    }

    /// Persist `lines`, reprice the cart and return its new state.
    async fn save_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        lines: CartLines,
    ) -> Result<Cart, CartsServiceError> {
        let prices = lines.price(&self.policy)?;

        self.items_repository
            .replace_cart_items(tx, cart, &lines)
            .await?;

        let mut saved = self
            .carts_repository
            .update_cart_prices(tx, cart, &prices)
            .await?;

        saved.items = lines;

        Ok(saved)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn get_cart(&self, owner: CartOwner) -> Result<Option<Cart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self.find_cart(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(name = "carts.service.add_item", skip(self), err)]
    async fn add_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartUpdate, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let snapshot = self
            .items_repository
            .lock_product(&mut tx, product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound)?;

        let cart = match self.find_cart(&mut tx, owner).await? {
            Some(cart) => cart,
            None => self.create_or_find_cart(&mut tx, owner).await?,
        };

        let mut lines = cart.items;
        let change = lines.add(snapshot.to_line(), snapshot.stock)?;

        let cart = self.save_lines(&mut tx, cart.uuid, lines).await?;

        tx.commit().await?;

        debug!(cart = %cart.uuid, ?change, "added item to cart");

        Ok(CartUpdate {
            cart,
            message: change.message(&snapshot.name),
        })
    }

    #[tracing::instrument(name = "carts.service.remove_item", skip(self), err)]
    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartUpdate, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .find_cart(&mut tx, owner)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let name = cart
            .items
            .get(product.into_uuid())
            .map(|line| line.name.clone())
            .ok_or(CartsServiceError::ItemNotFound)?;

        let mut lines = cart.items;
        let change = lines.remove(product.into_uuid())?;

        let cart = self.save_lines(&mut tx, cart.uuid, lines).await?;

        tx.commit().await?;

        debug!(cart = %cart.uuid, ?change, "removed item from cart");

        Ok(CartUpdate {
            cart,
            message: change.message(&name),
        })
    }

    #[tracing::instrument(name = "carts.service.claim_session_cart", skip(self), err)]
    async fn claim_session_cart(
        &self,
        session: Uuid,
        user: UserUuid,
    ) -> Result<Option<Cart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(session_cart) = self
            .carts_repository
            .find_session_cart(&mut tx, session)
            .await?
        else {
            let cart = self.find_cart(&mut tx, CartOwner::user(session, user)).await?;

            tx.commit().await?;

            return Ok(cart);
        };

        let session_lines = self
            .items_repository
            .list_cart_items(&mut tx, session_cart.uuid)
            .await?;

        if session_lines.is_empty() {
            self.carts_repository
                .delete_cart(&mut tx, session_cart.uuid)
                .await?;

            let cart = self.find_cart(&mut tx, CartOwner::user(session, user)).await?;

            tx.commit().await?;

            return Ok(cart);
        }

        if let Some(previous) = self.carts_repository.find_user_cart(&mut tx, user).await? {
            self.carts_repository
                .delete_cart(&mut tx, previous.uuid)
                .await?;
        }

        let products: Vec<Uuid> = session_lines
            .as_slice()
            .iter()
            .map(|line| line.product)
            .collect();
        let stock = self
            .items_repository
            .list_product_stock(&mut tx, &products)
            .await?;

        let mut lines = CartLines::new();

        lines.merge(session_lines, |product| {
            stock.get(&product).copied().unwrap_or_default()
        });

        self.carts_repository
            .assign_cart_user(&mut tx, session_cart.uuid, user)
            .await?;

        let mut cart = self.save_lines(&mut tx, session_cart.uuid, lines).await?;

        cart.user_uuid = Some(user);

        tx.commit().await?;

        info!(cart = %cart.uuid, %user, "claimed session cart");

        Ok(Some(cart))
    }

    async fn clear_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let cleared = self.save_lines(&mut tx, cart, CartLines::new()).await?;

        tx.commit().await?;

        Ok(cleared)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the owner's cart, if one exists.
    async fn get_cart(&self, owner: CartOwner) -> Result<Option<Cart>, CartsServiceError>;

    /// Add one unit of a product, creating the cart when needed.
    async fn add_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Remove one unit of a product.
    async fn remove_item(
        &self,
        owner: CartOwner,
        product: ProductUuid,
    ) -> Result<CartUpdate, CartsServiceError>;

    /// Turn a session cart into the user's cart, replacing any previous user cart.
    async fn claim_session_cart(
        &self,
        session: Uuid,
        user: UserUuid,
    ) -> Result<Option<Cart>, CartsServiceError>;

    /// Empty a cart and reprice it.
    async fn clear_cart(&self, cart: CartUuid) -> Result<Cart, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::products::ProductsService,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn first_add_creates_cart_with_one_line() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let tent = helpers::create_product(&ctx, tents.uuid, "Ridge Tent", 120_00, 3).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        let update = ctx.carts.add_item(owner, tent.uuid).await?;

        assert_eq!(update.message, "Ridge Tent added to cart");
        assert_eq!(update.cart.items.len(), 1);
        assert_eq!(update.cart.prices.items_price, 120_00);
        assert_eq!(update.cart.prices.shipping_price, 0);
        assert_eq!(update.cart.prices.tax_price, 25_20);
        assert_eq!(update.cart.prices.total_price, 145_20);

        let fetched = ctx.carts.get_cart(owner).await?;

        assert_eq!(fetched, Some(update.cart));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn concurrent_first_adds_share_one_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;
        let stove = helpers::create_product(&ctx, gear.uuid, "Pocket Stove", 30_00, 3).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        let (first, second) = tokio::join!(
            ctx.carts.add_item(owner, tent.uuid),
            ctx.carts.add_item(owner, stove.uuid),
        );

        assert_eq!(first?.cart.uuid, second?.cart.uuid);

        let cart = ctx.carts.get_cart(owner).await?.ok_or("cart should exist")?;

        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.prices.items_price, 150_00);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn losing_the_create_race_returns_the_existing_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        let existing = ctx.carts.add_item(owner, tent.uuid).await?.cart;

        let mut tx = ctx.db.begin().await?;

        let skipped = ctx
            .carts
            .carts_repository
            .create_cart(&mut tx, CartUuid::new(), owner.session, None)
            .await?;

        assert!(skipped.is_none(), "duplicate session cart should not insert");

        let cart = ctx.carts.create_or_find_cart(&mut tx, owner).await?;

        tx.rollback().await?;

        assert_eq!(cart.uuid, existing.uuid);
        assert_eq!(cart.items.units(), 1);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn adding_again_increments_until_stock_runs_out() -> TestResult {
        let ctx = TestContext::new().await;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;
        let stove = helpers::create_product(&ctx, stoves.uuid, "Pocket Stove", 30_00, 2).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        ctx.carts.add_item(owner, stove.uuid).await?;

        let update = ctx.carts.add_item(owner, stove.uuid).await?;

        assert_eq!(update.message, "Pocket Stove updated in cart");
        assert_eq!(update.cart.items.units(), 2);
        assert_eq!(update.cart.prices.shipping_price, 10_00);

        let result = ctx.carts.add_item(owner, stove.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotEnoughStock)),
            "expected NotEnoughStock, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn unknown_or_deleted_products_are_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;
        let stove = helpers::create_product(&ctx, stoves.uuid, "Pocket Stove", 30_00, 2).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        let result = ctx.carts.add_item(owner, ProductUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        ctx.products.delete_product(stove.uuid).await?;

        let result = ctx.carts.add_item(owner, stove.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn remove_steps_down_then_drops_line() -> TestResult {
        let ctx = TestContext::new().await;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;
        let stove = helpers::create_product(&ctx, stoves.uuid, "Pocket Stove", 30_00, 5).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        ctx.carts.add_item(owner, stove.uuid).await?;
        ctx.carts.add_item(owner, stove.uuid).await?;

        let update = ctx.carts.remove_item(owner, stove.uuid).await?;

        assert_eq!(update.message, "Pocket Stove updated in cart");
        assert_eq!(update.cart.items.units(), 1);

        let update = ctx.carts.remove_item(owner, stove.uuid).await?;

        assert_eq!(update.message, "Pocket Stove removed from cart");
        assert!(update.cart.items.is_empty(), "expected an empty cart");

        let result = ctx.carts.remove_item(owner, stove.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn remove_without_cart_returns_cart_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .remove_item(CartOwner::guest(Uuid::now_v7()), ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn claim_replaces_previous_user_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;
        let stove = helpers::create_product(&ctx, gear.uuid, "Pocket Stove", 30_00, 3).await?;

        let old_session = Uuid::now_v7();
        ctx.carts
            .add_item(CartOwner::user(old_session, user.uuid), tent.uuid)
            .await?;

        let session = Uuid::now_v7();
        ctx.carts.add_item(CartOwner::guest(session), stove.uuid).await?;

        let claimed = ctx
            .carts
            .claim_session_cart(session, user.uuid)
            .await?
            .ok_or("expected a claimed cart")?;

        assert_eq!(claimed.user_uuid, Some(user.uuid));
        assert_eq!(claimed.items.len(), 1);
        assert!(claimed.items.get(stove.uuid.into_uuid()).is_some(), "stove kept");

        let current = ctx
            .carts
            .get_cart(CartOwner::user(Uuid::now_v7(), user.uuid))
            .await?;

        assert_eq!(current, Some(claimed));
        assert_eq!(ctx.carts.get_cart(CartOwner::guest(session)).await?, None);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn claiming_missing_session_cart_keeps_user_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx, "Ada Lovelace", "ada@example.com").await?;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;

        let existing = ctx
            .carts
            .add_item(CartOwner::user(Uuid::now_v7(), user.uuid), tent.uuid)
            .await?
            .cart;

        let claimed = ctx
            .carts
            .claim_session_cart(Uuid::now_v7(), user.uuid)
            .await?;

        assert_eq!(claimed, Some(existing));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn clear_cart_empties_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let gear = helpers::create_category(&ctx, "Gear").await?;
        let tent = helpers::create_product(&ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;
        let owner = CartOwner::guest(Uuid::now_v7());

        let cart = ctx.carts.add_item(owner, tent.uuid).await?.cart;

        let cleared = ctx.carts.clear_cart(cart.uuid).await?;

        assert!(cleared.items.is_empty(), "expected no lines");
        assert_eq!(cleared.prices.items_price, 0);

        Ok(())
    }
}
