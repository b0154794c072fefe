//! Subcategory request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::subcategories::models::Subcategory;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryResponse {
    pub uuid: Uuid,
    pub category_uuid: Uuid,
    pub name: String,

    /// Unique within the parent category
    pub slug: String,
}

impl From<Subcategory> for SubcategoryResponse {
    fn from(subcategory: Subcategory) -> Self {
        SubcategoryResponse {
            uuid: subcategory.uuid.into(),
            category_uuid: subcategory.category_uuid.into(),
            name: subcategory.name,
            slug: subcategory.slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoriesResponse {
    pub subcategories: Vec<SubcategoryResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubcategoryRequest {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,
}
