//! Cart Items Repository

use emporium::cart::{CartLine, CartLines};
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Row, Transaction, query};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{carts::models::CartUuid, products::models::ProductUuid},
};

const LIST_CART_ITEMS_SQL: &str = include_str!("../sql/list_cart_items.sql");
const DELETE_CART_ITEMS_SQL: &str = include_str!("../sql/delete_cart_items.sql");
const CREATE_CART_ITEMS_SQL: &str = include_str!("../sql/create_cart_items.sql");
const LOCK_PRODUCT_SQL: &str = include_str!("../sql/lock_product.sql");
const LIST_PRODUCT_STOCK_SQL: &str = include_str!("../sql/list_product_stock.sql");

/// The fields of a locked product row needed to build or check a cart line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ProductSnapshot {
    pub(crate) uuid: ProductUuid,
    pub(crate) name: String,
    pub(crate) slug: String,
    pub(crate) image: Option<String>,
    pub(crate) price: u64,
    pub(crate) stock: u32,
}

impl ProductSnapshot {
    /// A single-unit cart line priced at the current product price.
    pub(crate) fn to_line(&self) -> CartLine {
        CartLine {
            product: self.uuid.into_uuid(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            quantity: 1,
            price: self.price,
            image: self.image.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartItemsRepository;

impl PgCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
    ) -> Result<CartLines, sqlx::Error> {
        let rows = query(LIST_CART_ITEMS_SQL)
            .bind(cart)
            .fetch_all(&mut **tx)
            .await?;

        let lines = rows
            .iter()
            .map(|row| {
                Ok(CartLine {
                    product: row.try_get("product_uuid")?,
                    name: row.try_get("name")?,
                    slug: row.try_get("slug")?,
                    quantity: try_get_quantity(row, "quantity")?,
                    price: try_get_amount(row, "price")?,
                    image: row.try_get("image")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(CartLines::from(lines))
    }

    /// Overwrite the stored lines of a cart, keeping their order.
    #[tracing::instrument(
        name = "carts.repository.replace_cart_items",
        skip(self, tx, lines),
        fields(%cart, line_count = lines.len()),
        err
    )]
    pub(crate) async fn replace_cart_items(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: CartUuid,
        lines: &CartLines,
    ) -> Result<(), sqlx::Error> {
        query(DELETE_CART_ITEMS_SQL)
            .bind(cart)
            .execute(&mut **tx)
            .await?;

        if lines.is_empty() {
            return Ok(());
        }

        let count = lines.len();
        let mut positions: Vec<i32> = Vec::with_capacity(count);
        let mut products: Vec<Uuid> = Vec::with_capacity(count);
        let mut names: Vec<&str> = Vec::with_capacity(count);
        let mut slugs: Vec<&str> = Vec::with_capacity(count);
        let mut images: Vec<Option<&str>> = Vec::with_capacity(count);
        let mut quantities: Vec<i32> = Vec::with_capacity(count);
        let mut prices: Vec<i64> = Vec::with_capacity(count);

        for (position, line) in lines.as_slice().iter().enumerate() {
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

        query(CREATE_CART_ITEMS_SQL)
            .bind(cart)
            .bind(&positions)
            .bind(&products)
            .bind(&names)
            .bind(&slugs)
            .bind(&images)
            .bind(&quantities)
            .bind(&prices)
            .execute(&mut **tx)
            .await?;

        debug!(line_count = count, "replaced cart items");

        Ok(())
    }

    /// Lock an active product row for the rest of the transaction.
    pub(crate) async fn lock_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Option<ProductSnapshot>, sqlx::Error> {
        let Some(row) = query(LOCK_PRODUCT_SQL)
            .bind(product)
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        Ok(Some(ProductSnapshot {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            image: row.try_get("image")?,
            price: try_get_amount(&row, "price")?,
            stock: try_get_quantity(&row, "stock")?,
        }))
    }

    /// Lock the given products and read their stock. Deleted products are absent.
    pub(crate) async fn list_product_stock(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, u32>, sqlx::Error> {
        if products.is_empty() {
            return Ok(FxHashMap::default());
        }

        let rows = query(LIST_PRODUCT_STOCK_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| Ok((row.try_get("uuid")?, try_get_quantity(row, "stock")?)))
            .collect()
    }
}
