//! Carts Repository

use emporium::{cart::CartLines, pricing::CartPrices};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::{
        carts::models::{Cart, CartUuid},
        users::models::UserUuid,
    },
};

const FIND_USER_CART_SQL: &str = include_str!("../sql/find_user_cart.sql");
const FIND_SESSION_CART_SQL: &str = include_str!("../sql/find_session_cart.sql");
const CREATE_CART_SQL: &str = include_str!("../sql/create_cart.sql");
const UPDATE_CART_PRICES_SQL: &str = include_str!("../sql/update_cart_prices.sql");
const ASSIGN_CART_USER_SQL: &str = include_str!("../sql/assign_cart_user.sql");
const DELETE_CART_SQL: &str = include_str!("../sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Find and lock the cart belonging to a user.
    pub(crate) async fn find_user_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_USER_CART_SQL)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Find and lock the anonymous cart for a session.
    pub(crate) async fn find_session_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        session: Uuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_SESSION_CART_SQL)
            .bind(session)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Insert a cart, yielding `None` when a concurrent request already created the owner's cart.
    pub(crate) async fn create_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        session: Uuid,
        user: Option<UserUuid>,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(CREATE_CART_SQL)
            .bind(cart)
            .bind(session)
            .bind(user)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        prices: &CartPrices,
    ) -> Result<Cart, sqlx::Error> {
        query_as::<Postgres, Cart>(UPDATE_CART_PRICES_SQL)
            .bind(cart)
            .bind(amount_to_i64(prices.items_price, "items_price")?)
            .bind(amount_to_i64(prices.tax_price, "tax_price")?)
            .bind(amount_to_i64(prices.shipping_price, "shipping_price")?)
            .bind(amount_to_i64(prices.total_price, "total_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn assign_cart_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        user: UserUuid,
    ) -> Result<(), sqlx::Error> {
        query(ASSIGN_CART_USER_SQL)
            .bind(cart)
            .bind(user)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            session_cart_id: row.try_get("session_cart_id")?,
            user_uuid: row.try_get("user_uuid")?,
            items: CartLines::new(),
            prices: CartPrices {
                items_price: try_get_amount(row, "items_price")?,
                shipping_price: try_get_amount(row, "shipping_price")?,
                tax_price: try_get_amount(row, "tax_price")?,
                total_price: try_get_amount(row, "total_price")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
