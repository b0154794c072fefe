//! Features Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    features::models::{Feature, FeatureUuid},
    products::models::ProductUuid,
};

const LIST_FEATURES_SQL: &str = include_str!("sql/list_features.sql");
const CREATE_FEATURE_SQL: &str = include_str!("sql/create_feature.sql");
const DELETE_FEATURE_SQL: &str = include_str!("sql/delete_feature.sql");
const SYNC_FEATURES_SQL: &str = include_str!("sql/sync_features.sql");
const SET_PRODUCT_FEATURES_SQL: &str = include_str!("sql/set_product_features.sql");
const DELETE_PRODUCT_FEATURES_SQL: &str = include_str!("sql/delete_product_features.sql");
const LIST_PRODUCT_FEATURES_SQL: &str = include_str!("sql/list_product_features.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgFeaturesRepository;

impl PgFeaturesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_features(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Feature>, sqlx::Error> {
        query_as::<Postgres, Feature>(LIST_FEATURES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_feature(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        feature: FeatureUuid,
        name: &str,
        slug: &str,
    ) -> Result<Feature, sqlx::Error> {
        query_as::<Postgres, Feature>(CREATE_FEATURE_SQL)
            .bind(feature)
            .bind(name)
            .bind(slug)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_feature(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        feature: FeatureUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_FEATURE_SQL)
            .bind(feature)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Upsert features by slug, returning the uuid for every requested slug.
    ///
    /// `features` holds `(name, slug)` pairs.
    #[tracing::instrument(
        name = "features.repository.sync_features",
        skip(self, tx, features),
        fields(
            names_count = tracing::field::Empty,
            synced_feature_count = tracing::field::Empty
        ),
        err
    )]
    pub(crate) async fn sync_features(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        features: &[(String, String)],
    ) -> Result<FxHashMap<String, FeatureUuid>, sqlx::Error> {
        tracing::Span::current().record("names_count", features.len());

        if features.is_empty() {
            return Ok(FxHashMap::default());
        }

        let new_uuids: Vec<Uuid> = features.iter().map(|_| Uuid::now_v7()).collect();
        let names: Vec<&str> = features.iter().map(|(name, _)| name.as_str()).collect();
        let slugs: Vec<&str> = features.iter().map(|(_, slug)| slug.as_str()).collect();

        let rows: Vec<(FeatureUuid, String)> = query_as(SYNC_FEATURES_SQL)
            .bind(&new_uuids)
            .bind(&names)
            .bind(&slugs)
            .fetch_all(&mut **tx)
            .await?;

        let feature_map: FxHashMap<String, FeatureUuid> = rows
            .into_iter()
            .map(|(uuid, slug)| (slug, uuid))
            .collect();

        let synced_feature_count = feature_map.len();

        tracing::Span::current().record("synced_feature_count", synced_feature_count);

        debug!(synced_feature_count, "synchronized features");

        Ok(feature_map)
    }

    #[tracing::instrument(
        name = "features.repository.replace_product_features",
        skip(self, tx, features),
        fields(%product, feature_count = features.len()),
        err
    )]
    pub(crate) async fn replace_product_features(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
        features: &[FeatureUuid],
    ) -> Result<(), sqlx::Error> {
        query(DELETE_PRODUCT_FEATURES_SQL)
            .bind(product)
            .execute(&mut **tx)
            .await?;

        if features.is_empty() {
            return Ok(());
        }

        let uuids: Vec<Uuid> = features.iter().map(|feature| feature.into_uuid()).collect();

        query(SET_PRODUCT_FEATURES_SQL)
            .bind(product)
            .bind(&uuids)
            .execute(&mut **tx)
            .await?;

        debug!(feature_count = uuids.len(), "replaced product features");

        Ok(())
    }

    /// Feature names for each of the given products, ordered by name.
    pub(crate) async fn list_product_features(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &[Uuid],
    ) -> Result<FxHashMap<Uuid, Vec<String>>, sqlx::Error> {
        if products.is_empty() {
            return Ok(FxHashMap::default());
        }

        let rows: Vec<(Uuid, String)> = query_as(LIST_PRODUCT_FEATURES_SQL)
            .bind(products)
            .fetch_all(&mut **tx)
            .await?;

        let mut by_product: FxHashMap<Uuid, Vec<String>> = FxHashMap::default();

        for (product, name) in rows {
            by_product.entry(product).or_default().push(name);
        }

        Ok(by_product)
    }
}

impl<'r> FromRow<'r, PgRow> for Feature {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: row.try_get("uuid")?,
            name: row.try_get("name")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
