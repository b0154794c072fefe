//! Brands service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        brands::{
            errors::BrandsServiceError,
            models::{Brand, BrandUpdate, BrandUuid, NewBrand},
            repository::PgBrandsRepository,
        },
        slugs::resolve_slug,
    },
};

#[derive(Debug, Clone)]
pub struct PgBrandsService {
    db: Db,
    repository: PgBrandsRepository,
}

impl PgBrandsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgBrandsRepository::new(),
        }
    }
}

#[async_trait]
impl BrandsService for PgBrandsService {
    async fn list_brands(&self) -> Result<Vec<Brand>, BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        let brands = self.repository.list_brands(&mut tx).await?;

        tx.commit().await?;

        Ok(brands)
    }

    async fn get_brand(&self, brand: BrandUuid) -> Result<Brand, BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        let brand = self.repository.get_brand(&mut tx, brand).await?;

        tx.commit().await?;

        Ok(brand)
    }

    async fn get_brand_by_slug(&self, slug: &str) -> Result<Brand, BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        let brand = self.repository.get_brand_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(brand)
    }

    async fn create_brand(&self, brand: NewBrand) -> Result<Brand, BrandsServiceError> {
        let name = brand.name.trim();
        let slug = resolve_slug(name, brand.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_brand(&mut tx, brand.uuid, name, &slug)
            .await?;

        tx.commit().await?;

        info!(brand = %created.uuid, slug = %created.slug, "created brand");

        Ok(created)
    }

    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<Brand, BrandsServiceError> {
        let name = update.name.trim();
        let slug = resolve_slug(name, update.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_brand(&mut tx, brand, name, &slug)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), BrandsServiceError> {
        let mut tx = self.db.begin().await?;

        if self.repository.count_brand_products(&mut tx, brand).await? > 0 {
            return Err(BrandsServiceError::InUse);
        }

        let rows_affected = self.repository.delete_brand(&mut tx, brand).await?;

        if rows_affected == 0 {
            return Err(BrandsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%brand, "deleted brand");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait BrandsService: Send + Sync {
    /// Retrieve all active brands ordered by name.
    async fn list_brands(&self) -> Result<Vec<Brand>, BrandsServiceError>;

    /// Retrieve a single brand.
    async fn get_brand(&self, brand: BrandUuid) -> Result<Brand, BrandsServiceError>;

    /// Retrieve a single brand by its slug.
    async fn get_brand_by_slug(&self, slug: &str) -> Result<Brand, BrandsServiceError>;

    /// Create a brand. The slug is derived from the name when not given.
    async fn create_brand(&self, brand: NewBrand) -> Result<Brand, BrandsServiceError>;

    /// Rename a brand and optionally change its slug.
    async fn update_brand(
        &self,
        brand: BrandUuid,
        update: BrandUpdate,
    ) -> Result<Brand, BrandsServiceError>;

    /// Soft delete a brand. Fails while products reference it.
    async fn delete_brand(&self, brand: BrandUuid) -> Result<(), BrandsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn create_brand_derives_slug() -> TestResult {
        let ctx = TestContext::new().await;

        let brand = ctx
            .brands
            .create_brand(NewBrand {
                uuid: BrandUuid::new(),
                name: "Fjällräven Outdoor".to_string(),
                slug: None,
            })
            .await?;

        assert_eq!(brand.slug, "fj-llr-ven-outdoor");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn list_brands_is_ordered_by_name() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_brand(&ctx, "Vaude").await?;
        helpers::create_brand(&ctx, "Arc'teryx").await?;

        let names: Vec<String> = ctx
            .brands
            .list_brands()
            .await?
            .into_iter()
            .map(|brand| brand.name)
            .collect();

        assert_eq!(names, vec!["Arc'teryx".to_string(), "Vaude".to_string()]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn update_unknown_brand_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .brands
            .update_brand(
                BrandUuid::new(),
                BrandUpdate {
                    name: "Vaude".to_string(),
                    slug: None,
                },
            )
            .await;

        assert!(
            matches!(result, Err(BrandsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn delete_brand_with_products_returns_in_use() -> TestResult {
        let ctx = TestContext::new().await;
        let category = helpers::create_category(&ctx, "Tents").await?;
        let brand = helpers::create_brand(&ctx, "Hilleberg").await?;

        helpers::create_branded_product(&ctx, category.uuid, brand.uuid, "Nallo 2", 650_00, 2)
            .await?;

        let result = ctx.brands.delete_brand(brand.uuid).await;

        assert!(
            matches!(result, Err(BrandsServiceError::InUse)),
            "expected InUse, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn delete_brand_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let brand = helpers::create_brand(&ctx, "Vaude").await?;

        ctx.brands.delete_brand(brand.uuid).await?;

        let result = ctx.brands.get_brand_by_slug("vaude").await;

        assert!(
            matches!(result, Err(BrandsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
