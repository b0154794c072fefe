//! Product request and response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium::catalog::Paginated;
use emporium_app::domain::products::models::{
    NewProduct, NewProductSpecification, Product, ProductSpecification, ProductUpdate,
    ProductUuid,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductSpecificationResponse {
    pub specification_uuid: Uuid,
    pub name: String,
    pub kind: String,
    pub unit: Option<String>,

    /// Normalised value, e.g. `1.5` or `true`
    pub value: String,
}

impl From<ProductSpecification> for ProductSpecificationResponse {
    fn from(specification: ProductSpecification) -> Self {
        ProductSpecificationResponse {
            specification_uuid: specification.specification_uuid.into(),
            name: specification.name,
            kind: specification.kind.to_string(),
            unit: specification.unit,
            value: specification.value.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub category_uuid: Uuid,
    pub subcategory_uuid: Option<Uuid>,
    pub brand_uuid: Option<Uuid>,

    /// Unit price in cents
    pub price: u64,

    pub stock: u32,
    pub in_stock: bool,
    pub is_featured: bool,
    pub image: Option<String>,
    pub specifications: Vec<ProductSpecificationResponse>,
    pub features: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            slug: product.slug,
            description: product.description,
            category_uuid: product.category_uuid.into(),
            subcategory_uuid: product.subcategory_uuid.map(Into::into),
            brand_uuid: product.brand_uuid.map(Into::into),
            price: product.price,
            stock: product.stock,
            in_stock: product.stock > 0,
            is_featured: product.is_featured,
            image: product.image,
            specifications: product
                .specifications
                .into_iter()
                .map(ProductSpecificationResponse::from)
                .collect(),
            features: product.features,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductResponse>,
}

/// One page of search results.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsPageResponse {
    pub products: Vec<ProductResponse>,
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

impl From<Paginated<Product>> for ProductsPageResponse {
    fn from(products: Paginated<Product>) -> Self {
        ProductsPageResponse {
            total: products.total,
            page: products.page.number(),
            pages: products.total_pages(),
            products: products
                .items
                .into_iter()
                .map(ProductResponse::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct SpecificationValueBody {
    pub specification_uuid: Uuid,

    /// Raw value, checked against the specification's kind
    pub value: String,
}

impl From<SpecificationValueBody> for NewProductSpecification {
    fn from(body: SpecificationValueBody) -> Self {
        NewProductSpecification {
            specification_uuid: body.specification_uuid.into(),
            value: body.value,
        }
    }
}

/// Create or replace a product.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: String,

    pub category_uuid: Uuid,

    #[serde(default)]
    pub subcategory_uuid: Option<Uuid>,

    #[serde(default)]
    pub brand_uuid: Option<Uuid>,

    pub price: u64,
    pub stock: u32,

    #[serde(default)]
    pub is_featured: bool,

    #[serde(default)]
    pub image: Option<String>,

    #[serde(default)]
    pub specifications: Vec<SpecificationValueBody>,

    /// Feature names. Unknown names are created on the fly.
    #[serde(default)]
    pub features: Vec<String>,
}

impl From<ProductRequest> for NewProduct {
    fn from(request: ProductRequest) -> Self {
        NewProduct {
            uuid: ProductUuid::new(),
            name: request.name,
            slug: request.slug,
            description: request.description,
            category_uuid: request.category_uuid.into(),
            subcategory_uuid: request.subcategory_uuid.map(Into::into),
            brand_uuid: request.brand_uuid.map(Into::into),
            price: request.price,
            stock: request.stock,
            is_featured: request.is_featured,
            image: request.image,
            specifications: request.specifications.into_iter().map(Into::into).collect(),
            features: request.features,
        }
    }
}

impl From<ProductRequest> for ProductUpdate {
    fn from(request: ProductRequest) -> Self {
        ProductUpdate {
            name: request.name,
            slug: request.slug,
            description: request.description,
            category_uuid: request.category_uuid.into(),
            subcategory_uuid: request.subcategory_uuid.map(Into::into),
            brand_uuid: request.brand_uuid.map(Into::into),
            price: request.price,
            stock: request.stock,
            is_featured: request.is_featured,
            image: request.image,
            specifications: request.specifications.into_iter().map(Into::into).collect(),
            features: request.features,
        }
    }
}
