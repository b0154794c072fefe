//! Subcategory Models

use jiff::Timestamp;

use crate::{domain::categories::models::CategoryUuid, uuids::TypedUuid};

/// Subcategory UUID
pub type SubcategoryUuid = TypedUuid<Subcategory>;

/// Subcategory Model
#[derive(Debug, Clone, PartialEq)]
pub struct Subcategory {
    pub uuid: SubcategoryUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,

    /// Unique within the parent category.
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Subcategory Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubcategory {
    pub uuid: SubcategoryUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub slug: Option<String>,
}

/// Subcategory Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct SubcategoryUpdate {
    pub name: String,
    pub slug: Option<String>,
}
