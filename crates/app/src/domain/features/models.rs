//! Feature Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Feature UUID
pub type FeatureUuid = TypedUuid<Feature>;

/// Feature Model
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub uuid: FeatureUuid,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
}

/// New Feature Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeature {
    pub uuid: FeatureUuid,
    pub name: String,
}
