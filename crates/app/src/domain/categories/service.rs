//! Categories service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        categories::{
            errors::CategoriesServiceError,
            models::{Category, CategoryUpdate, CategoryUuid, NewCategory},
            repository::PgCategoriesRepository,
        },
        slugs::resolve_slug,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryUuid,
    ) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category_by_slug(&mut tx, slug).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        let name = category.name.trim();
        let slug = resolve_slug(name, category.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_category(&mut tx, category.uuid, name, &slug)
            .await?;

        tx.commit().await?;

        info!(category = %created.uuid, slug = %created.slug, "created category");

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError> {
        let name = update.name.trim();
        let slug = resolve_slug(name, update.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, name, &slug)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .repository
            .count_category_products(&mut tx, category)
            .await?
            > 0
        {
            return Err(CategoriesServiceError::InUse);
        }

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%category, "deleted category");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieve all active categories ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(&self, category: CategoryUuid)
    -> Result<Category, CategoriesServiceError>;

    /// Retrieve a single category by its slug.
    async fn get_category_by_slug(&self, slug: &str) -> Result<Category, CategoriesServiceError>;

    /// Create a category. The slug is derived from the name when not given.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;

    /// Rename a category and optionally change its slug.
    async fn update_category(
        &self,
        category: CategoryUuid,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError>;

    /// Soft delete a category and its subcategories. Fails while products reference it.
    async fn delete_category(&self, category: CategoryUuid) -> Result<(), CategoriesServiceError>;
}
