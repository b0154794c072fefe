//! Features service.

use async_trait::async_trait;
use emporium::slug::{SlugError, slugify, validate_slug};
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::features::{
        errors::FeaturesServiceError,
        models::{Feature, FeatureUuid, NewFeature},
        repository::PgFeaturesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgFeaturesService {
    db: Db,
    repository: PgFeaturesRepository,
}

impl PgFeaturesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgFeaturesRepository::new(),
        }
    }
}

/// Trim feature names and pair each with its slug, dropping blanks and duplicates.
pub(crate) fn feature_slugs(names: &[String]) -> Result<Vec<(String, String)>, SlugError> {
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(names.len());

    for name in names.iter().map(|name| name.trim()).filter(|name| !name.is_empty()) {
        let slug = slugify(name);

        validate_slug(&slug)?;

        if pairs.iter().all(|(_, existing)| *existing != slug) {
            pairs.push((name.to_string(), slug));
        }
    }

    Ok(pairs)
}

#[async_trait]
impl FeaturesService for PgFeaturesService {
    async fn list_features(&self) -> Result<Vec<Feature>, FeaturesServiceError> {
        let mut tx = self.db.begin().await?;

        let features = self.repository.list_features(&mut tx).await?;

        tx.commit().await?;

        Ok(features)
    }

    async fn create_feature(&self, feature: NewFeature) -> Result<Feature, FeaturesServiceError> {
        let name = feature.name.trim();

        if name.is_empty() {
            return Err(FeaturesServiceError::MissingRequiredData);
        }

        let slug = slugify(name);

        validate_slug(&slug)?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_feature(&mut tx, feature.uuid, name, &slug)
            .await?;

        tx.commit().await?;

        info!(feature = %created.uuid, slug = %created.slug, "created feature");

        Ok(created)
    }

    async fn delete_feature(&self, feature: FeatureUuid) -> Result<(), FeaturesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_feature(&mut tx, feature).await?;

        if rows_affected == 0 {
            return Err(FeaturesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait FeaturesService: Send + Sync {
    /// Retrieve every feature, ordered by name.
    async fn list_features(&self) -> Result<Vec<Feature>, FeaturesServiceError>;

    /// Create a feature. Its slug is derived from the name.
    async fn create_feature(&self, feature: NewFeature) -> Result<Feature, FeaturesServiceError>;

    /// Delete a feature, detaching it from every product.
    async fn delete_feature(&self, feature: FeatureUuid) -> Result<(), FeaturesServiceError>;
}
