//! Specification request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::specifications::models::Specification;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SpecificationResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub name: String,

    /// One of `text`, `number` or `boolean`
    pub kind: String,

    pub unit: Option<String>,
}

impl From<Specification> for SpecificationResponse {
    fn from(specification: Specification) -> Self {
        SpecificationResponse {
            uuid: specification.uuid.into(),
            category_uuid: specification.category_uuid.into(),
            name: specification.name,
            kind: specification.kind.to_string(),
            unit: specification.unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SpecificationsResponse {
    pub specifications: Vec<SpecificationResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateSpecificationRequest {
    pub category_uuid: Uuid,
    pub name: String,
    pub kind: String,

    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateSpecificationRequest {
    pub name: String,
    pub kind: String,

    #[serde(default)]
    pub unit: Option<String>,
}
