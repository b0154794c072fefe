//! Product Models

use emporium::specifications::{SpecificationKind, SpecificationValue};
use jiff::Timestamp;

use crate::{
    domain::{
        brands::models::BrandUuid, categories::models::CategoryUuid,
        specifications::models::SpecificationUuid, subcategories::models::SubcategoryUuid,
    },
    uuids::TypedUuid,
};

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub brand_uuid: Option<BrandUuid>,

    /// Unit price in cents.
    pub price: u64,
    pub stock: u32,
    pub is_featured: bool,
    pub image: Option<String>,
    pub specifications: Vec<ProductSpecification>,

    /// Feature names, ordered alphabetically.
    pub features: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A specification value attached to a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSpecification {
    pub specification_uuid: SpecificationUuid,
    pub name: String,
    pub kind: SpecificationKind,
    pub unit: Option<String>,
    pub value: SpecificationValue,
}

/// Raw specification value supplied when writing a product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProductSpecification {
    pub specification_uuid: SpecificationUuid,
    pub value: String,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,

    /// Derived from the name when absent.
    pub slug: Option<String>,
    pub description: String,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub brand_uuid: Option<BrandUuid>,
    pub price: u64,
    pub stock: u32,
    pub is_featured: bool,
    pub image: Option<String>,
    pub specifications: Vec<NewProductSpecification>,
    pub features: Vec<String>,
}

/// Product Update Model
///
/// Replaces every field, including the specification values and features.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub slug: Option<String>,
    pub description: String,
    pub category_uuid: CategoryUuid,
    pub subcategory_uuid: Option<SubcategoryUuid>,
    pub brand_uuid: Option<BrandUuid>,
    pub price: u64,
    pub stock: u32,
    pub is_featured: bool,
    pub image: Option<String>,
    pub specifications: Vec<NewProductSpecification>,
    pub features: Vec<String>,
}
