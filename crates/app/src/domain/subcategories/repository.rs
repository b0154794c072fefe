//! Subcategories Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    categories::models::CategoryUuid,
    subcategories::models::{Subcategory, SubcategoryUuid},
};

const LIST_SUBCATEGORIES_SQL: &str = include_str!("sql/list_subcategories.sql");
const GET_SUBCATEGORY_SQL: &str = include_str!("sql/get_subcategory.sql");
const GET_SUBCATEGORY_BY_SLUG_SQL: &str = include_str!("sql/get_subcategory_by_slug.sql");
const CATEGORY_IS_ACTIVE_SQL: &str = include_str!("sql/category_is_active.sql");
const CREATE_SUBCATEGORY_SQL: &str = include_str!("sql/create_subcategory.sql");
const UPDATE_SUBCATEGORY_SQL: &str = include_str!("sql/update_subcategory.sql");
const COUNT_SUBCATEGORY_PRODUCTS_SQL: &str = include_str!("sql/count_subcategory_products.sql");
const DELETE_SUBCATEGORY_SQL: &str = include_str!("sql/delete_subcategory.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSubcategoriesRepository;

impl PgSubcategoriesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_subcategories(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Vec<Subcategory>, sqlx::Error> {
        query_as::<Postgres, Subcategory>(LIST_SUBCATEGORIES_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<Subcategory, sqlx::Error> {
        query_as::<Postgres, Subcategory>(GET_SUBCATEGORY_SQL)
            .bind(subcategory)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_subcategory_by_slug(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        slug: &str,
    ) -> Result<Subcategory, sqlx::Error> {
        query_as::<Postgres, Subcategory>(GET_SUBCATEGORY_BY_SLUG_SQL)
            .bind(category)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
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

    pub(crate) async fn create_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
        category: CategoryUuid,
        name: &str,
        slug: &str,
    ) -> Result<Subcategory, sqlx::Error> {
        query_as::<Postgres, Subcategory>(CREATE_SUBCATEGORY_SQL)
            .bind(subcategory)
            .bind(category)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
        name: &str,
        slug: &str,
    ) -> Result<Subcategory, sqlx::Error> {
        query_as::<Postgres, Subcategory>(UPDATE_SUBCATEGORY_SQL)
            .bind(subcategory)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_subcategory_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_SUBCATEGORY_PRODUCTS_SQL)
            .bind(subcategory)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_subcategory(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        subcategory: SubcategoryUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SUBCATEGORY_SQL)
            .bind(subcategory)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Subcategory {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            category_uuid: row.try_get("category_uuid")?,
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
