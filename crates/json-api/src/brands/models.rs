//! Brand request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::brands::models::{Brand, BrandUpdate, BrandUuid, NewBrand};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Brand> for BrandResponse {
    fn from(brand: Brand) -> Self {
        BrandResponse {
            uuid: brand.uuid.into(),
            name: brand.name,
            slug: brand.slug,
            created_at: brand.created_at.to_string(),
            updated_at: brand.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandsResponse {
    pub brands: Vec<BrandResponse>,
}

/// Create or update a brand. The slug is derived from the name when omitted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct BrandRequest {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,
}

impl From<BrandRequest> for NewBrand {
    fn from(request: BrandRequest) -> Self {
        NewBrand {
            uuid: BrandUuid::new(),
            name: request.name,
            slug: request.slug,
        }
    }
}

impl From<BrandRequest> for BrandUpdate {
    fn from(request: BrandRequest) -> Self {
        BrandUpdate {
            name: request.name,
            slug: request.slug,
        }
    }
}
