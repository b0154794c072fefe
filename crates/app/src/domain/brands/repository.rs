//! Brands Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::brands::models::{Brand, BrandUuid};

const LIST_BRANDS_SQL: &str = include_str!("sql/list_brands.sql");
const GET_BRAND_SQL: &str = include_str!("sql/get_brand.sql");
const GET_BRAND_BY_SLUG_SQL: &str = include_str!("sql/get_brand_by_slug.sql");
const CREATE_BRAND_SQL: &str = include_str!("sql/create_brand.sql");
const UPDATE_BRAND_SQL: &str = include_str!("sql/update_brand.sql");
const COUNT_BRAND_PRODUCTS_SQL: &str = include_str!("sql/count_brand_products.sql");
const DELETE_BRAND_SQL: &str = include_str!("sql/delete_brand.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgBrandsRepository;

impl PgBrandsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_brands(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        query_as::<Postgres, Brand>(LIST_BRANDS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(GET_BRAND_SQL)
            .bind(brand)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_brand_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        slug: &str,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(GET_BRAND_BY_SLUG_SQL)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
        name: &str,
        slug: &str,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(CREATE_BRAND_SQL)
            .bind(brand)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
        name: &str,
        slug: &str,
    ) -> Result<Brand, sqlx::Error> {
        query_as::<Postgres, Brand>(UPDATE_BRAND_SQL)
            .bind(brand)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_brand_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_BRAND_PRODUCTS_SQL)
            .bind(brand)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_brand(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        brand: BrandUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_BRAND_SQL)
            .bind(brand)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Brand {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
