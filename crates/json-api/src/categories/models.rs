//! Category request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::{
    categories::models::Category, specifications::models::Specification,
    subcategories::models::Subcategory,
};

use crate::{
    specifications::models::SpecificationResponse, subcategories::models::SubcategoryResponse,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            uuid: category.uuid.into(),
            name: category.name,
            slug: category.slug,
            created_at: category.created_at.to_string(),
            updated_at: category.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoriesResponse {
    pub categories: Vec<CategoryResponse>,
}

/// A category with everything a storefront filter panel needs.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,

    pub subcategories: Vec<SubcategoryResponse>,

    pub specifications: Vec<SpecificationResponse>,
}

impl CategoryDetailResponse {
    pub(crate) fn new(
        category: Category,
        subcategories: Vec<Subcategory>,
        specifications: Vec<Specification>,
    ) -> Self {
        CategoryDetailResponse {
            category: category.into(),
            subcategories: subcategories.into_iter().map(Into::into).collect(),
            specifications: specifications.into_iter().map(Into::into).collect(),
        }
    }
}

/// Create or update a category. The slug is derived from the name when omitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,
}
