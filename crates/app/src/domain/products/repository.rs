//! Products Repository

use emporium::{
    catalog::ProductQuery,
    specifications::{SpecificationKind, SpecificationValue},
};
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    database::{amount_to_i64, quantity_to_i32, try_get_amount, try_get_quantity},
    domain::{
        brands::models::BrandUuid,
        categories::models::CategoryUuid,
        products::models::{Product, ProductSpecification, ProductUuid},
        specifications::{models::SpecificationUuid, repository::try_get_kind},
        subcategories::models::SubcategoryUuid,
    },
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const LIST_FEATURED_PRODUCTS_SQL: &str = include_str!("sql/list_featured_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const GET_PRODUCT_BY_SLUG_SQL: &str = include_str!("sql/get_product_by_slug.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");
const CATEGORY_IS_ACTIVE_SQL: &str = include_str!("sql/category_is_active.sql");
const BRAND_IS_ACTIVE_SQL: &str = include_str!("sql/brand_is_active.sql");
const SUBCATEGORY_CATEGORY_SQL: &str = include_str!("sql/subcategory_category.sql");
const LIST_CATEGORY_SPECIFICATIONS_SQL: &str =
    include_str!("sql/list_category_specifications.sql");
const LIST_PRODUCT_SPECIFICATIONS_SQL: &str = include_str!("sql/list_product_specifications.sql");
const DELETE_PRODUCT_SPECIFICATIONS_SQL: &str =
    include_str!("sql/delete_product_specifications.sql");
const CREATE_PRODUCT_SPECIFICATIONS_SQL: &str =
    include_str!("sql/create_product_specifications.sql");

/// Column values written on product create and update.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductColumns<'a> {
    pub(crate) name: &'a str,
    pub(crate) slug: &'a str,
    pub(crate) description: &'a str,
    pub(crate) category_uuid: CategoryUuid,
    pub(crate) subcategory_uuid: Option<SubcategoryUuid>,
    pub(crate) brand_uuid: Option<BrandUuid>,
    pub(crate) price: u64,
    pub(crate) stock: u32,
    pub(crate) is_featured: bool,
    pub(crate) image: Option<&'a str>,
}

/// Wrap `text` for a case-insensitive substring match, escaping `LIKE` metacharacters.
pub(crate) fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);

    pattern.push('%');

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }

        pattern.push(c);
    }

    pattern.push('%');

    pattern
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "products.repository.list_products",
        skip(self, tx, filter),
        fields(sort = filter.sort.as_str(), page = filter.page.number()),
        err
    )]
    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: &ProductQuery,
    ) -> Result<(Vec<Product>, u64), sqlx::Error> {
        let pattern = filter.text().map(like_pattern);
        let category = filter.category.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let brand = filter.brand.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let min = filter
            .price
            .map(|range| amount_to_i64(range.min, "price"))
            .transpose()?;
        let max = filter
            .price
            .map(|range| amount_to_i64(range.max, "price"))
            .transpose()?;
        let limit = amount_to_i64(filter.page.limit(), "limit")?;
        let offset = amount_to_i64(filter.page.offset(), "offset")?;

        let total: i64 = query_scalar(COUNT_PRODUCTS_SQL)
            .bind(pattern.as_deref())
            .bind(category)
            .bind(brand)
            .bind(min)
            .bind(max)
            .fetch_one(&mut **tx)
            .await?;

        let products = query_as::<Postgres, Product>(LIST_PRODUCTS_SQL)
            .bind(pattern.as_deref())
            .bind(category)
            .bind(brand)
            .bind(min)
            .bind(max)
            .bind(filter.sort.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut **tx)
            .await?;

        let total = u64::try_from(total).map_err(|e| sqlx::Error::ColumnDecode {
            index: "count".to_string(),
            source: Box::new(e),
        })?;

        debug!(total, returned = products.len(), "listed products");

        Ok((products, total))
    }

    pub(crate) async fn list_featured_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        limit: u32,
    ) -> Result<Vec<Product>, sqlx::Error> {
        query_as::<Postgres, Product>(LIST_FEATURED_PRODUCTS_SQL)
            .bind(i64::from(limit))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_SQL)
            .bind(product)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(GET_PRODUCT_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        columns: ProductColumns<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(CREATE_PRODUCT_SQL)
            .bind(product)
            .bind(columns.name)
            .bind(columns.slug)
            .bind(columns.description)
            .bind(columns.category_uuid)
            .bind(columns.subcategory_uuid)
            .bind(columns.brand_uuid)
            .bind(amount_to_i64(columns.price, "price")?)
            .bind(quantity_to_i32(columns.stock, "stock")?)
            .bind(columns.is_featured)
            .bind(columns.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        columns: ProductColumns<'_>,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Postgres, Product>(UPDATE_PRODUCT_SQL)
            .bind(product)
            .bind(columns.name)
            .bind(columns.slug)
            .bind(columns.description)
            .bind(columns.category_uuid)
            .bind(columns.subcategory_uuid)
            .bind(columns.brand_uuid)
            .bind(amount_to_i64(columns.price, "price")?)
            .bind(quantity_to_i32(columns.stock, "stock")?)
            .bind(columns.is_featured)
            .bind(columns.image)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn category_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(CATEGORY_IS_ACTIVE_SQL)
            .bind(category)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn brand_is_active(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<bool, sqlx::Error> {
        query_scalar::<Postgres, bool>(BRAND_IS_ACTIVE_SQL)
            .bind(brand)
            .fetch_one(&mut **tx)
            .await
    }

    /// The category an active subcategory belongs to.
    pub(crate) async fn subcategory_category(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<Option<CategoryUuid>, sqlx::Error> {
        query_scalar(SUBCATEGORY_CATEGORY_SQL)
            .bind(subcategory)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Kinds of every specification defined for a category.
    pub(crate) async fn list_category_specifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<FxHashMap<SpecificationUuid, SpecificationKind>, sqlx::Error> {
        let rows = query(LIST_CATEGORY_SPECIFICATIONS_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| {
                Ok((
                    row.try_get("uuid")?,
                    try_get_kind(row, "kind")?,
                ))
            })
            .collect()
    }

    #[tracing::instrument(
        name = "products.repository.list_product_specifications",
        skip(self, tx, products),
        fields(product_count = products.len()),
        err
    )]
    pub(crate) async fn list_product_specifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, Vec<ProductSpecification>>, sqlx::Error> {
        if products.is_empty() {
            return Ok(FxHashMap::default());
        }

        let rows = query(LIST_PRODUCT_SPECIFICATIONS_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<Uuid, Vec<ProductSpecification>> = FxHashMap::default();

        for row in &rows {
            let product: Uuid = row.try_get("product_uuid")?;
            let kind = try_get_kind(row, "kind")?;
            let raw: String = row.try_get("value")?;

            let value = kind
                .parse_value(&raw)
                .map_err(|e| sqlx::Error::ColumnDecode {
                    index: "value".to_string(),
                    source: Box::new(e),
                })?;

            by_product
                .entry(product)
                .or_default()
                .push(ProductSpecification {
                    specification_uuid: row.try_get("specification_uuid")?,
                    name: row.try_get("name")?,
                    kind,
                    unit: row.try_get("unit")?,
                    value,
                });
        }

        Ok(by_product)
    }

    #[tracing::instrument(
        name = "products.repository.replace_product_specifications",
        skip(self, tx, values),
        fields(%product, value_count = values.len()),
        err
    )]
    pub(crate) async fn replace_product_specifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        values: &[(SpecificationUuid, SpecificationValue)],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_PRODUCT_SPECIFICATIONS_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?;

        if values.is_empty() {
            return Ok(());
        }

        let specification_uuids: Vec<Uuid> =
            values.iter().map(|(uuid, _)| uuid.into_uuid()).collect();
        let raw_values: Vec<String> = values.iter().map(|(_, value)| value.to_string()).collect();

        query(CREATE_PRODUCT_SPECIFICATIONS_SQL)
            .bind(product)
            .bind(&specification_uuids)
            .bind(&raw_values)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            description: row.try_get("description")?,
            category_uuid: row.try_get("category_uuid")?,
            subcategory_uuid: row.try_get("subcategory_uuid")?,
            brand_uuid: row.try_get("brand_uuid")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_quantity(row, "stock")?,
            is_featured: row.try_get("is_featured")?,
            image: row.try_get("image")?,
            specifications: Vec::new(),
            features: Vec::new(),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("tent"), "%tent%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }
}
