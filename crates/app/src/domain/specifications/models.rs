//! Specification Models

use emporium::specifications::SpecificationKind;
use jiff::Timestamp;

use crate::{domain::categories::models::CategoryUuid, uuids::TypedUuid};

/// Specification UUID
pub type SpecificationUuid = TypedUuid<Specification>;

/// Typed product attribute scoped to a category, e.g. `weight` measured in `kg`.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub uuid: SpecificationUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub kind: SpecificationKind,
    pub unit: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Specification Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewSpecification {
    pub uuid: SpecificationUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub kind: SpecificationKind,
    pub unit: Option<String>,
}

/// Specification Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct SpecificationUpdate {
    pub name: String,
    pub kind: SpecificationKind,
    pub unit: Option<String>,
}
