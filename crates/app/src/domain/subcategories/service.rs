//! Subcategories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::models::CategoryUuid,
        slugs::resolve_slug,
        subcategories::{
            errors::SubcategoriesServiceError,
            models::{NewSubcategory, Subcategory, SubcategoryUpdate, SubcategoryUuid},
            repository::PgSubcategoriesRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSubcategoriesService {
    db: Db,
    repository: PgSubcategoriesRepository,
}

impl PgSubcategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSubcategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl SubcategoriesService for PgSubcategoriesService {
    async fn list_subcategories(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<Subcategory>, SubcategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let subcategories = self.repository.list_subcategories(&mut tx, category).await?;

        tx.commit().await?;

        Ok(subcategories)
    }

    async fn get_subcategory(
        &self,
        subcategory: SubcategoryUuid,
    ) -> Result<Subcategory, SubcategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let subcategory = self.repository.get_subcategory(&mut tx, subcategory).await?;

        tx.commit().await?;

        Ok(subcategory)
    }

    async fn get_subcategory_by_slug(
        &self,
        category: CategoryUuid,
        slug: &str,
    ) -> Result<Subcategory, SubcategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let subcategory = self
            .repository
            .get_subcategory_by_slug(&mut tx, category, slug)
            .await?;

        tx.commit().await?;

        Ok(subcategory)
    }

    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, SubcategoriesServiceError> {
        let name = subcategory.name.trim();
        let slug = resolve_slug(name, subcategory.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        if !self
            .repository
            .category_is_active(&mut tx, subcategory.category_uuid)
            .await?
        {
            return Err(SubcategoriesServiceError::InvalidReference);
        }

        let created = self
            .repository
            .create_subcategory(
                &mut tx,
                subcategory.uuid,
                subcategory.category_uuid,
                name,
                &slug,
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        update: SubcategoryUpdate,
    ) -> Result<Subcategory, SubcategoriesServiceError> {
        let name = update.name.trim();
        let slug = resolve_slug(name, update.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_subcategory(&mut tx, subcategory, name, &slug)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_subcategory(
        &self,
        subcategory: SubcategoryUuid,
    ) -> Result<(), SubcategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .repository
            .count_subcategory_products(&mut tx, subcategory)
            .await?
            > 0
        {
            return Err(SubcategoriesServiceError::InUse);
        }

        let rows_affected = self
            .repository
            .delete_subcategory(&mut tx, subcategory)
            .await?;

        if rows_affected == 0 {
            return Err(SubcategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SubcategoriesService: Send + Sync {
    /// Retrieve the active subcategories of a category.
    async fn list_subcategories(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<Subcategory>, SubcategoriesServiceError>;

    /// Retrieve a single subcategory.
    async fn get_subcategory(
        &self,
        subcategory: SubcategoryUuid,
    ) -> Result<Subcategory, SubcategoriesServiceError>;

    /// Retrieve a subcategory by its slug within a category.
    async fn get_subcategory_by_slug(
        &self,
        category: CategoryUuid,
        slug: &str,
    ) -> Result<Subcategory, SubcategoriesServiceError>;

    /// Create a subcategory under an active category.
    async fn create_subcategory(
        &self,
        subcategory: NewSubcategory,
    ) -> Result<Subcategory, SubcategoriesServiceError>;

    /// Rename a subcategory and optionally change its slug.
    async fn update_subcategory(
        &self,
        subcategory: SubcategoryUuid,
        update: SubcategoryUpdate,
    ) -> Result<Subcategory, SubcategoriesServiceError>;

    /// Soft delete a subcategory. Fails while products reference it.
    async fn delete_subcategory(
        &self,
        subcategory: SubcategoryUuid,
    ) -> Result<(), SubcategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::categories::CategoriesService,
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn same_slug_is_allowed_in_different_categories() -> TestResult {
        let ctx = TestContext::new().await;
        let men = helpers::create_category(&ctx, "Men").await?;
        let women = helpers::create_category(&ctx, "Women").await?;

        let a = helpers::create_subcategory(&ctx, men.uuid, "Jackets").await?;
        let b = helpers::create_subcategory(&ctx, women.uuid, "Jackets").await?;

        assert_eq!(a.slug, b.slug);
        assert_ne!(a.uuid, b.uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn duplicate_slug_within_category_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;
        let men = helpers::create_category(&ctx, "Men").await?;

        helpers::create_subcategory(&ctx, men.uuid, "Jackets").await?;

        let result = helpers::create_subcategory(&ctx, men.uuid, "Jackets").await;

        assert!(
            matches!(result, Err(SubcategoriesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn create_under_unknown_category_returns_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = helpers::create_subcategory(&ctx, CategoryUuid::new(), "Jackets").await;

        assert!(
            matches!(result, Err(SubcategoriesServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn get_by_slug_is_scoped_to_category() -> TestResult {
        let ctx = TestContext::new().await;
        let men = helpers::create_category(&ctx, "Men").await?;
        let women = helpers::create_category(&ctx, "Women").await?;

        let jackets = helpers::create_subcategory(&ctx, men.uuid, "Jackets").await?;

        let found = ctx
            .subcategories
            .get_subcategory_by_slug(men.uuid, "jackets")
            .await?;

        assert_eq!(found.uuid, jackets.uuid);

        let result = ctx
            .subcategories
            .get_subcategory_by_slug(women.uuid, "jackets")
            .await;

        assert!(
            matches!(result, Err(SubcategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn deleting_category_hides_its_subcategories() -> TestResult {
        let ctx = TestContext::new().await;
        let men = helpers::create_category(&ctx, "Men").await?;

        helpers::create_subcategory(&ctx, men.uuid, "Jackets").await?;

        ctx.categories.delete_category(men.uuid).await?;

        let subcategories = ctx.subcategories.list_subcategories(men.uuid).await?;

        assert!(subcategories.is_empty());

        Ok(())
    }
}
