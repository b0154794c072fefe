//! Feature request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::features::models::Feature;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeatureResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
}

impl From<Feature> for FeatureResponse {
    fn from(feature: Feature) -> Self {
        FeatureResponse {
            uuid: feature.uuid.into(),
            name: feature.name,
            slug: feature.slug,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeaturesResponse {
    pub features: Vec<FeatureResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FeatureRequest {
    pub name: String,
}
