//! Specifications Repository

use emporium::specifications::SpecificationKind;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, query_scalar};

use crate::domain::{
    categories::models::CategoryUuid,
    specifications::models::{Specification, SpecificationUuid},
};

const LIST_SPECIFICATIONS_SQL: &str = include_str!("sql/list_specifications.sql");
const GET_SPECIFICATION_SQL: &str = include_str!("sql/get_specification.sql");
const CATEGORY_IS_ACTIVE_SQL: &str = include_str!("sql/category_is_active.sql");
const CREATE_SPECIFICATION_SQL: &str = include_str!("sql/create_specification.sql");
const UPDATE_SPECIFICATION_SQL: &str = include_str!("sql/update_specification.sql");
const COUNT_SPECIFICATION_VALUES_SQL: &str = include_str!("sql/count_specification_values.sql");
const DELETE_SPECIFICATION_SQL: &str = include_str!("sql/delete_specification.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSpecificationsRepository;

impl PgSpecificationsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_specifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
    ) -> Result<Vec<Specification>, sqlx::Error> {
        query_as::<Postgres, Specification>(LIST_SPECIFICATIONS_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await
    }

    /// Fetch and lock a specification row.
    pub(crate) async fn get_specification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        specification: SpecificationUuid,
    ) -> Result<Specification, sqlx::Error> {
        query_as::<Postgres, Specification>(GET_SPECIFICATION_SQL)
            .bind(specification)
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

    pub(crate) async fn create_specification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        specification: SpecificationUuid,
        category: CategoryUuid,
        name: &str,
        kind: SpecificationKind,
        unit: Option<&str>,
    ) -> Result<Specification, sqlx::Error> {
        query_as::<Postgres, Specification>(CREATE_SPECIFICATION_SQL)
            .bind(specification)
            .bind(category)
            .bind(name)
            .bind(kind.as_str())
            .bind(unit)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_specification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        specification: SpecificationUuid,
        name: &str,
        kind: SpecificationKind,
        unit: Option<&str>,
    ) -> Result<Specification, sqlx::Error> {
        query_as::<Postgres, Specification>(UPDATE_SPECIFICATION_SQL)
            .bind(specification)
            .bind(name)
            .bind(kind.as_str())
            .bind(unit)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn count_specification_values(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        specification: SpecificationUuid,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_SPECIFICATION_VALUES_SQL)
            .bind(specification)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_specification(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        specification: SpecificationUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SPECIFICATION_SQL)
            .bind(specification)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

pub(crate) fn try_get_kind(row: &PgRow, col: &str) -> Result<SpecificationKind, sqlx::Error> {
    let kind: String = row.try_get(col)?;

    kind.parse().map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for Specification {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            category_uuid: row.try_get("category_uuid")?,
            name: row.try_get("name")?,
            kind: try_get_kind(row, "kind")?,
            unit: row.try_get("unit")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
