//! Products service.

use async_trait::async_trait;
use emporium::{
    catalog::{Paginated, ProductQuery},
    specifications::SpecificationValue,
};
use mockall::automock;
use rustc_hash::FxHashSet;
use sqlx::{Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::{
    database::Db,
    domain::{
        brands::models::BrandUuid,
        categories::models::CategoryUuid,
        features::{repository::PgFeaturesRepository, service::feature_slugs},
        products::{
            errors::ProductsServiceError,
            models::{NewProduct, NewProductSpecification, Product, ProductUpdate, ProductUuid},
            repository::{PgProductsRepository, ProductColumns},
        },
        slugs::resolve_slug,
        specifications::models::SpecificationUuid,
        subcategories::models::SubcategoryUuid,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    features: PgFeaturesRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            features: PgFeaturesRepository::new(),
        }
    }

    /// Load specification values and feature names for `products`.
    async fn attach_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        products: &mut [Product],
    ) -> Result<(), ProductsServiceError> {
        let uuids: Vec<Uuid> = products.iter().map(|product| product.uuid.into_uuid()).collect();

        let mut specifications = self
            .repository
            .list_product_specifications(tx, &uuids)
            .await?;
        let mut features = self.features.list_product_features(tx, &uuids).await?;

        for product in products.iter_mut() {
            let uuid = product.uuid.into_uuid();

            product.specifications = specifications.remove(&uuid).unwrap_or_default();
            product.features = features.remove(&uuid).unwrap_or_default();
        }

        Ok(())
    }

    /// Check that the category and brand are active and the subcategory sits under the category.
    async fn check_references(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        subcategory: Option<SubcategoryUuid>,
        brand: Option<BrandUuid>,
    ) -> Result<(), ProductsServiceError> {
        if !self.repository.category_is_active(tx, category).await? {
            return Err(ProductsServiceError::InvalidReference);
        }

        if let Some(subcategory) = subcategory {
            match self.repository.subcategory_category(tx, subcategory).await? {
                None => return Err(ProductsServiceError::InvalidReference),
                Some(parent) if parent != category => {
                    return Err(ProductsServiceError::InvalidData);
                }
                Some(_) => {}
            }
        }

        if let Some(brand) = brand
            && !self.repository.brand_is_active(tx, brand).await?
        {
            return Err(ProductsServiceError::InvalidReference);
        }

        Ok(())
    }

    /// Parse every value against its specification's kind.
    ///
    /// Specifications must belong to `category` and may appear only once.
    async fn parse_specifications(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        category: CategoryUuid,
        values: &[NewProductSpecification],
    ) -> Result<Vec<(SpecificationUuid, SpecificationValue)>, ProductsServiceError> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let kinds = self
            .repository
            .list_category_specifications(tx, category)
            .await?;

        let mut seen: FxHashSet<SpecificationUuid> = FxHashSet::default();
        let mut parsed = Vec::with_capacity(values.len());

        for value in values {
            let kind = kinds
                .get(&value.specification_uuid)
                .ok_or(ProductsServiceError::InvalidData)?;

            if !seen.insert(value.specification_uuid) {
                return Err(ProductsServiceError::InvalidData);
            }

            parsed.push((value.specification_uuid, kind.parse_value(&value.value)?));
        }

        Ok(parsed)
    }

    /// Write specification values and features for a freshly saved product.
    async fn save_details(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &mut Product,
        specifications: &[NewProductSpecification],
        features: &[String],
    ) -> Result<(), ProductsServiceError> {
        let values = self
            .parse_specifications(tx, product.category_uuid, specifications)
            .await?;

        self.repository
            .replace_product_specifications(tx, product.uuid, &values)
            .await?;

        let pairs = feature_slugs(features)?;
        let feature_map = self.features.sync_features(tx, &pairs).await?;
        let feature_uuids: Vec<_> = pairs
            .iter()
            .filter_map(|(_, slug)| feature_map.get(slug).copied())
            .collect();

        self.features
            .replace_product_features(tx, product.uuid, &feature_uuids)
            .await?;

        self.attach_details(tx, std::slice::from_mut(product)).await
    }
}

fn product_name(name: &str) -> Result<&str, ProductsServiceError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ProductsServiceError::MissingRequiredData);
    }

    Ok(name)
}

fn product_image(image: Option<&str>) -> Option<&str> {
    image.map(str::trim).filter(|image| !image.is_empty())
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Paginated<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let (mut products, total) = self.repository.list_products(&mut tx, &query).await?;

        self.attach_details(&mut tx, &mut products).await?;

        tx.commit().await?;

        Ok(Paginated {
            items: products,
            total,
            page: query.page,
        })
    }

    async fn list_featured_products(
        &self,
        limit: u32,
    ) -> Result<Vec<Product>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut products = self
            .repository
            .list_featured_products(&mut tx, limit)
            .await?;

        self.attach_details(&mut tx, &mut products).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut product = self.repository.get_product(&mut tx, product).await?;

        self.attach_details(&mut tx, std::slice::from_mut(&mut product))
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut product = self.repository.get_product_by_slug(&mut tx, slug).await?;

        self.attach_details(&mut tx, std::slice::from_mut(&mut product))
            .await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError> {
        let name = product_name(&product.name)?;
        let slug = resolve_slug(name, product.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        self.check_references(
            &mut tx,
            product.category_uuid,
            product.subcategory_uuid,
            product.brand_uuid,
        )
        .await?;

        let mut created = self
            .repository
            .create_product(
                &mut tx,
                product.uuid,
                ProductColumns {
                    name,
                    slug: &slug,
                    description: product.description.trim(),
                    category_uuid: product.category_uuid,
                    subcategory_uuid: product.subcategory_uuid,
                    brand_uuid: product.brand_uuid,
                    price: product.price,
                    stock: product.stock,
                    is_featured: product.is_featured,
                    image: product_image(product.image.as_deref()),
                },
            )
            .await?;

        self.save_details(
            &mut tx,
            &mut created,
            &product.specifications,
            &product.features,
        )
        .await?;

        tx.commit().await?;

        info!(product = %created.uuid, slug = %created.slug, "created product");

        Ok(created)
    }

    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError> {
        let name = product_name(&update.name)?;
        let slug = resolve_slug(name, update.slug.as_deref())?;

        let mut tx = self.db.begin().await?;

        self.check_references(
            &mut tx,
            update.category_uuid,
            update.subcategory_uuid,
            update.brand_uuid,
        )
        .await?;

        let mut updated = self
            .repository
            .update_product(
                &mut tx,
                product,
                ProductColumns {
                    name,
                    slug: &slug,
                    description: update.description.trim(),
                    category_uuid: update.category_uuid,
                    subcategory_uuid: update.subcategory_uuid,
                    brand_uuid: update.brand_uuid,
                    price: update.price,
                    stock: update.stock,
                    is_featured: update.is_featured,
                    image: product_image(update.image.as_deref()),
                },
            )
            .await?;

        self.save_details(
            &mut tx,
            &mut updated,
            &update.specifications,
            &update.features,
        )
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(%product, "deleted product");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Search, filter, sort and paginate active products.
    async fn list_products(
        &self,
        query: ProductQuery,
    ) -> Result<Paginated<Product>, ProductsServiceError>;

    /// Retrieve the newest featured products.
    async fn list_featured_products(&self, limit: u32)
    -> Result<Vec<Product>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, ProductsServiceError>;

    /// Retrieve a single product by its slug.
    async fn get_product_by_slug(&self, slug: &str) -> Result<Product, ProductsServiceError>;

    /// Create a new product with its specification values and features.
    async fn create_product(&self, product: NewProduct) -> Result<Product, ProductsServiceError>;

    /// Replace a product's fields, specification values and features.
    async fn update_product(
        &self,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<Product, ProductsServiceError>;

    /// Soft-delete a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use emporium::{
        catalog::{Page, PriceRange, ProductSort},
        specifications::SpecificationKind,
    };
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::{features::FeaturesService, subcategories::SubcategoriesService},
        test::{TestContext, helpers},
    };

    use super::*;

    fn new_product(category: CategoryUuid, name: &str) -> NewProduct {
        NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
            slug: None,
            description: String::new(),
            category_uuid: category,
            subcategory_uuid: None,
            brand_uuid: None,
            price: 49_99,
            stock: 5,
            is_featured: false,
            image: None,
            specifications: Vec::new(),
            features: Vec::new(),
        }
    }

    #[test]
    fn blank_names_are_missing() {
        let result = product_name("   ");

        assert!(
            matches!(result, Err(ProductsServiceError::MissingRequiredData)),
            "expected MissingRequiredData, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn create_product_stores_specifications_and_features() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let weight =
            helpers::create_specification(&ctx, tents.uuid, "Weight", SpecificationKind::Number)
                .await?;

        let created = ctx
            .products
            .create_product(NewProduct {
                specifications: vec![NewProductSpecification {
                    specification_uuid: weight.uuid,
                    value: "2.50".to_string(),
                }],
                features: vec!["Waterproof".to_string(), "Freestanding".to_string()],
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await?;

        assert_eq!(created.slug, "ridge-tent");
        assert_eq!(created.features, vec!["Freestanding", "Waterproof"]);

        let fetched = ctx.products.get_product_by_slug("ridge-tent").await?;

        assert_eq!(fetched, created);

        let spec = fetched.specifications.first().ok_or("missing specification")?;

        assert_eq!(spec.name, "Weight");
        assert_eq!(spec.value, SpecificationValue::Number(Decimal::new(25, 1)));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn features_are_shared_between_products() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;

        ctx.products
            .create_product(NewProduct {
                features: vec!["Waterproof".to_string()],
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await?;

        ctx.products
            .create_product(NewProduct {
                features: vec!["waterproof".to_string()],
                ..new_product(tents.uuid, "Dome Tent")
            })
            .await?;

        let features = ctx.features.list_features().await?;

        assert_eq!(features.len(), 1, "expected one shared feature");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn specification_from_another_category_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;
        let output =
            helpers::create_specification(&ctx, stoves.uuid, "Output", SpecificationKind::Number)
                .await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                specifications: vec![NewProductSpecification {
                    specification_uuid: output.uuid,
                    value: "3000".to_string(),
                }],
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn value_not_matching_kind_is_invalid() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let weight =
            helpers::create_specification(&ctx, tents.uuid, "Weight", SpecificationKind::Number)
                .await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                specifications: vec![NewProductSpecification {
                    specification_uuid: weight.uuid,
                    value: "heavy".to_string(),
                }],
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn subcategory_must_belong_to_category() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;
        let gas = helpers::create_subcategory(&ctx, stoves.uuid, "Gas").await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                subcategory_uuid: Some(gas.uuid),
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        ctx.subcategories.delete_subcategory(gas.uuid).await?;

        let result = ctx
            .products
            .create_product(NewProduct {
                subcategory_uuid: Some(gas.uuid),
                ..new_product(stoves.uuid, "Pocket Stove")
            })
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn list_products_filters_sorts_and_paginates() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let stoves = helpers::create_category(&ctx, "Stoves").await?;

        helpers::create_product(&ctx, tents.uuid, "Ridge Tent", 120_00, 3).await?;
        helpers::create_product(&ctx, tents.uuid, "Dome Tent", 80_00, 3).await?;
        helpers::create_product(&ctx, tents.uuid, "Tunnel Tent", 200_00, 3).await?;
        helpers::create_product(&ctx, stoves.uuid, "Pocket Stove", 30_00, 3).await?;

        let page = ctx
            .products
            .list_products(ProductQuery {
                category: Some("tents".to_string()),
                price: Some(PriceRange::new(50_00, 150_00)?),
                sort: ProductSort::Lowest,
                ..ProductQuery::default()
            })
            .await?;

        let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Dome Tent", "Ridge Tent"]);
        assert_eq!(page.total, 2);

        let second = ctx
            .products
            .list_products(ProductQuery {
                sort: ProductSort::Name,
                page: Page::new(2, 3),
                ..ProductQuery::default()
            })
            .await?;

        let names: Vec<&str> = second.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Tunnel Tent"]);
        assert_eq!(second.total, 4);
        assert_eq!(second.total_pages(), 2);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn text_search_is_case_insensitive_and_literal() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;

        helpers::create_product(&ctx, tents.uuid, "Ridge Tent", 120_00, 3).await?;
        helpers::create_product(&ctx, tents.uuid, "100% Wool Blanket", 40_00, 3).await?;

        let found = ctx
            .products
            .list_products(ProductQuery {
                query: Some("RIDGE".to_string()),
                ..ProductQuery::default()
            })
            .await?;

        assert_eq!(found.total, 1);

        let literal = ctx
            .products
            .list_products(ProductQuery {
                query: Some("0%".to_string()),
                ..ProductQuery::default()
            })
            .await?;

        let names: Vec<&str> = literal.items.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["100% Wool Blanket"]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn deleted_products_are_hidden() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;
        let product = helpers::create_product(&ctx, tents.uuid, "Ridge Tent", 120_00, 3).await?;

        ctx.products.delete_product(product.uuid).await?;

        let result = ctx.products.get_product(product.uuid).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let again = ctx.products.delete_product(product.uuid).await;

        assert!(
            matches!(again, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn featured_products_are_listed_newest_first() -> TestResult {
        let ctx = TestContext::new().await;
        let tents = helpers::create_category(&ctx, "Tents").await?;

        ctx.products
            .create_product(NewProduct {
                is_featured: true,
                ..new_product(tents.uuid, "Ridge Tent")
            })
            .await?;
        ctx.products
            .create_product(NewProduct {
                is_featured: true,
                ..new_product(tents.uuid, "Dome Tent")
            })
            .await?;
        helpers::create_product(&ctx, tents.uuid, "Tunnel Tent", 200_00, 3).await?;

        let featured = ctx.products.list_featured_products(1).await?;
        let names: Vec<&str> = featured.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Dome Tent"]);

        Ok(())
    }
}
