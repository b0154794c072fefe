//! Orders Repository

use emporium::{
    cart::CartLine,
    checkout::{PaymentMethod, ShippingAddress},
    pricing::CartPrices,
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{
    FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar,
    types::Json,
};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        orders::models::{Order, OrderUuid},
        users::models::UserUuid,
    },
};

const GET_CHECKOUT_USER_SQL: &str = include_str!("sql/get_checkout_user.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEMS_SQL: &str = include_str!("sql/create_order_items.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const LOCK_ORDER_SQL: &str = include_str!("sql/lock_order.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const COUNT_USER_ORDERS_SQL: &str = include_str!("sql/count_user_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const COUNT_ORDERS_SQL: &str = include_str!("sql/count_orders.sql");
const MARK_ORDER_PAID_SQL: &str = include_str!("sql/mark_order_paid.sql");
const MARK_ORDER_DELIVERED_SQL: &str = include_str!("sql/mark_order_delivered.sql");
const DELETE_ORDER_SQL: &str = include_str!("sql/delete_order.sql");

/// Address and payment method on file for the user placing an order.
#[derive(Debug, Clone, Default)]
pub(crate) struct CheckoutDetails {
    pub(crate) address: Option<ShippingAddress>,
    pub(crate) payment_method: Option<PaymentMethod>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Lock the user row and read their checkout details.
    pub(crate) async fn get_checkout_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<CheckoutDetails, sqlx::Error> {
        let row = query(GET_CHECKOUT_USER_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await?;

        let payment_method = row
            .try_get::<Option<String>, _>("payment_method")?
            .map(|method| method.parse::<PaymentMethod>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "payment_method".to_string(),
                source: Box::new(e),
            })?;

        Ok(CheckoutDetails {
            address: row
                .try_get::<Option<Json<ShippingAddress>>, _>("address")?
                .map(|address| address.0),
            payment_method,
        })
    }

    /// Take the ordered quantities out of stock.
    ///
    /// Returns how many products had enough stock; lines that did not are left untouched.
    #[tracing::instrument(
        name = "orders.repository.decrement_stock",
        skip(self, tx, lines),
        fields(line_count = lines.len()),
        err
    )]
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[CartLine],
    ) -> Result<u64, sqlx::Error> {
        let products: Vec<Uuid> = lines.iter().map(|line| line.product).collect();
        let quantities = lines
            .iter()
            .map(|line| quantity_to_i32(line.quantity, "quantity"))
            .collect::<Result<Vec<_>, _>>()?;

        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(&products)
            .bind(&quantities)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        debug!(rows_affected, "decremented stock");

        Ok(rows_affected)
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        user: UserUuid,
        address: &ShippingAddress,
        payment_method: PaymentMethod,
        prices: &CartPrices,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(CREATE_ORDER_SQL)
            .bind(order)
            .bind(user)
            .bind(Json(address))
            .bind(payment_method.as_str())
            .bind(amount_to_i64(prices.items_price, "items_price")?)
            .bind(amount_to_i64(prices.tax_price, "tax_price")?)
            .bind(amount_to_i64(prices.shipping_price, "shipping_price")?)
            .bind(amount_to_i64(prices.total_price, "total_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
        lines: &[CartLine],
    ) -> Result<(), sqlx::Error> {
        let count = lines.len();
        let mut positions: Vec<i32> = Vec::with_capacity(count);
        let mut products: Vec<Uuid> = Vec::with_capacity(count);
        let mut names: Vec<&str> = Vec::with_capacity(count);
        let mut slugs: Vec<&str> = Vec::with_capacity(count);
        let mut images: Vec<Option<&str>> = Vec::with_capacity(count);
        let mut quantities: Vec<i32> = Vec::with_capacity(count);
        let mut prices: Vec<i64> = Vec::with_capacity(count);

        for (position, line) in lines.iter().enumerate() {
            positions.push(i32::try_from(position).map_err(|e| {
                sqlx::Error::Encode(format!("position: {e}").into())
            })?);
            products.push(line.product);
            names.push(&line.name);
            slugs.push(&line.slug);
            images.push(line.image.as_deref());
            quantities.push(quantity_to_i32(line.quantity, "quantity")?);
            prices.push(amount_to_i64(line.price, "price")?);
        }

        query(CREATE_ORDER_ITEMS_SQL)
            .bind(order)
            .bind(&positions)
            .bind(&products)
            .bind(&names)
            .bind(&slugs)
            .bind(&images)
            .bind(&quantities)
            .bind(&prices)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(GET_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn lock_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(LOCK_ORDER_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    /// Lines of every given order, in their original cart order.
    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        orders: &[Uuid],
    ) -> Result<FxHashMap<Uuid, Vec<CartLine>>, sqlx::Error> {
        if orders.is_empty() {
            return Ok(FxHashMap::default());
        }

        let rows = query(LIST_ORDER_ITEMS_SQL)
            .bind(orders)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_order: FxHashMap<Uuid, Vec<CartLine>> = FxHashMap::default();

        for row in &rows {
            let order: Uuid = row.try_get("order_uuid")?;

            by_order.entry(order).or_default().push(CartLine {
                product: row.try_get("product_uuid")?,
                name: row.try_get("name")?,
                slug: row.try_get("slug")?,
                quantity: try_get_quantity(row, "quantity")?,
                price: try_get_amount(row, "price")?,
                image: row.try_get("image")?,
            });
        }

        Ok(by_order)
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), sqlx::Error> {
        let orders = query_as::<Postgres, Order>(LIST_USER_ORDERS_SQL)
            .bind(user)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await?;

        let total = query_scalar::<Postgres, i64>(COUNT_USER_ORDERS_SQL)
            .bind(user)
            .fetch_one(&mut **tx)
            .await?;

        Ok((orders, total))
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Order>, i64), sqlx::Error> {
        let orders = query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await?;

        let total = query_scalar::<Postgres, i64>(COUNT_ORDERS_SQL)
            .fetch_one(&mut **tx)
            .await?;

        Ok((orders, total))
    }

    pub(crate) async fn mark_order_paid(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_ORDER_PAID_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn mark_order_delivered(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        query_as::<Postgres, Order>(MARK_ORDER_DELIVERED_SQL)
            .bind(order)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(order)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let payment_method: String = row.try_get("payment_method")?;
        let payment_method =
            payment_method
                .parse::<PaymentMethod>()
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "payment_method".to_string(),
                    source: Box::new(e),
                })?;

        Ok(Self {
            uuid: row.try_get("uuid")?,
            user_uuid: row.try_get("user_uuid")?,
            shipping_address: row
                .try_get::<Json<ShippingAddress>, _>("shipping_address")?
                .0,
            payment_method,
            items: Vec::new(),
            prices: CartPrices {
                items_price: try_get_amount(row, "items_price")?,
                shipping_price: try_get_amount(row, "shipping_price")?,
                tax_price: try_get_amount(row, "tax_price")?,
                total_price: try_get_amount(row, "total_price")?,
            },
            paid_at: row
                .try_get::<Option<SqlxTimestamp>, _>("paid_at")?
                .map(SqlxTimestamp::to_jiff),
            delivered_at: row
                .try_get::<Option<SqlxTimestamp>, _>("delivered_at")?
                .map(SqlxTimestamp::to_jiff),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
