//! Brand Models

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// Brand UUID
pub type BrandUuid = TypedUuid<Brand>;

/// Brand Model
#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub uuid: BrandUuid,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// New Brand Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewBrand {
    pub uuid: BrandUuid,
    pub name: String,

    /// Derived from the name when absent.
    pub slug: Option<String>,
}

/// Brand Update Model
#[derive(Debug, Clone, PartialEq)]
pub struct BrandUpdate {
    pub name: String,
    pub slug: Option<String>,
}
