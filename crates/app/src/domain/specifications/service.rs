//! Specifications service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        categories::models::CategoryUuid,
        specifications::{
            errors::SpecificationsServiceError,
            models::{NewSpecification, Specification, SpecificationUpdate, SpecificationUuid},
            repository::PgSpecificationsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgSpecificationsService {
    db: Db,
    repository: PgSpecificationsRepository,
}

impl PgSpecificationsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSpecificationsRepository::new(),
        }
    }
}

fn normalise_unit(unit: Option<&str>) -> Option<&str> {
    unit.map(str::trim).filter(|unit| !unit.is_empty())
}

#[async_trait]
impl SpecificationsService for PgSpecificationsService {
    async fn list_specifications(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<Specification>, SpecificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let specifications = self
            .repository
            .list_specifications(&mut tx, category)
            .await?;

        tx.commit().await?;

        Ok(specifications)
    }

    async fn get_specification(
        &self,
        specification: SpecificationUuid,
    ) -> Result<Specification, SpecificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let specification = self
            .repository
            .get_specification(&mut tx, specification)
            .await?;

        tx.commit().await?;

        Ok(specification)
    }

    async fn create_specification(
        &self,
        specification: NewSpecification,
    ) -> Result<Specification, SpecificationsServiceError> {
        let name = specification.name.trim();

        if name.is_empty() {
            return Err(SpecificationsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        if !self
            .repository
            .category_is_active(&mut tx, specification.category_uuid)
            .await?
        {
            return Err(SpecificationsServiceError::InvalidReference);
        }

        let created = self
            .repository
            .create_specification(
                &mut tx,
                specification.uuid,
                specification.category_uuid,
                name,
                specification.kind,
                normalise_unit(specification.unit.as_deref()),
            )
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_specification(
        &self,
        specification: SpecificationUuid,
        update: SpecificationUpdate,
    ) -> Result<Specification, SpecificationsServiceError> {
        let name = update.name.trim();

        if name.is_empty() {
            return Err(SpecificationsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let current = self
            .repository
            .get_specification(&mut tx, specification)
            .await?;

        if current.kind != update.kind
            && self
                .repository
                .count_specification_values(&mut tx, specification)
                .await?
                > 0
        {
            return Err(SpecificationsServiceError::InUse);
        }

        let updated = self
            .repository
            .update_specification(
                &mut tx,
                specification,
                name,
                update.kind,
                normalise_unit(update.unit.as_deref()),
            )
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_specification(
        &self,
        specification: SpecificationUuid,
    ) -> Result<(), SpecificationsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_specification(&mut tx, specification)
            .await?;

        if rows_affected == 0 {
            return Err(SpecificationsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait SpecificationsService: Send + Sync {
    /// Retrieve the specifications defined for a category.
    async fn list_specifications(
        &self,
        category: CategoryUuid,
    ) -> Result<Vec<Specification>, SpecificationsServiceError>;

    /// Retrieve a single specification.
    async fn get_specification(
        &self,
        specification: SpecificationUuid,
    ) -> Result<Specification, SpecificationsServiceError>;

    /// Define a new specification for a category.
    async fn create_specification(
        &self,
        specification: NewSpecification,
    ) -> Result<Specification, SpecificationsServiceError>;

    /// Change a specification. The kind is fixed once products carry values for it.
    async fn update_specification(
        &self,
        specification: SpecificationUuid,
        update: SpecificationUpdate,
    ) -> Result<Specification, SpecificationsServiceError>;

    /// Delete a specification together with every product value for it.
    async fn delete_specification(
        &self,
        specification: SpecificationUuid,
    ) -> Result<(), SpecificationsServiceError>;
}
