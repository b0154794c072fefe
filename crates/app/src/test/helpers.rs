//! Test Helpers

use emporium::{
    checkout::{PaymentMethod, ShippingAddress},
    specifications::SpecificationKind,
};
use testresult::TestResult;
use uuid::Uuid;

use crate::{
    domain::{
        brands::{
            BrandsService, BrandsServiceError,
            models::{Brand, BrandUuid, NewBrand},
        },
        carts::{CartsService, models::CartOwner},
        categories::{
            CategoriesService, CategoriesServiceError,
            models::{Category, CategoryUuid, NewCategory},
        },
        orders::{OrdersService, models::Order},
        products::{
            ProductsService, ProductsServiceError,
            models::{NewProduct, NewProductSpecification, Product, ProductUuid},
        },
        specifications::{
            SpecificationsService, SpecificationsServiceError,
            models::{NewSpecification, Specification, SpecificationUuid},
        },
        subcategories::{
            SubcategoriesService, SubcategoriesServiceError,
            models::{NewSubcategory, Subcategory, SubcategoryUuid},
        },
        users::{
            UsersService, UsersServiceError,
            models::{NewUser, Role, User, UserUuid},
            password::Password,
        },
    },
    test::TestContext,
};

pub(crate) const PASSWORD: &str = "correct horse battery";

pub(crate) fn new_user(name: &str, email: &str, password: &str) -> NewUser {
    NewUser {
        uuid: UserUuid::new(),
        name: name.to_string(),
        email: email.to_string(),
        password: Password::new(password),
        role: Role::User,
    }
}

pub(crate) fn shipping_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Ada Lovelace".to_string(),
        street_address: "12 St James's Square".to_string(),
        city: "London".to_string(),
        postal_code: "SW1Y 4JH".to_string(),
        country: "United Kingdom".to_string(),
    }
}

fn new_product(category: CategoryUuid, name: &str, price: u64, stock: u32) -> NewProduct {
    NewProduct {
        uuid: ProductUuid::new(),
        name: name.to_string(),
        slug: None,
        description: format!("{name} for the trail"),
        category_uuid: category,
        subcategory_uuid: None,
        brand_uuid: None,
        price,
        stock,
        is_featured: false,
        image: None,
        specifications: Vec::new(),
        features: Vec::new(),
    }
}

pub(crate) async fn create_user(
    ctx: &TestContext,
    name: &str,
    email: &str,
) -> Result<User, UsersServiceError> {
    ctx.users.sign_up(new_user(name, email, PASSWORD)).await
}

/// A user with an address and payment method on file.
pub(crate) async fn create_checkout_user(ctx: &TestContext) -> Result<User, UsersServiceError> {
    let user = create_user(ctx, "Grace Hopper", "grace@example.com").await?;

    ctx.users
        .update_address(user.uuid, shipping_address())
        .await?;

    ctx.users
        .update_payment_method(user.uuid, PaymentMethod::PayPal)
        .await
}

pub(crate) async fn create_category(
    ctx: &TestContext,
    name: &str,
) -> Result<Category, CategoriesServiceError> {
    ctx.categories
        .create_category(NewCategory {
            uuid: CategoryUuid::new(),
            name: name.to_string(),
            slug: None,
        })
        .await
}

pub(crate) async fn create_brand(
    ctx: &TestContext,
    name: &str,
) -> Result<Brand, BrandsServiceError> {
    ctx.brands
        .create_brand(NewBrand {
            uuid: BrandUuid::new(),
            name: name.to_string(),
            slug: None,
        })
        .await
}

pub(crate) async fn create_subcategory(
    ctx: &TestContext,
    category: CategoryUuid,
    name: &str,
) -> Result<Subcategory, SubcategoriesServiceError> {
    ctx.subcategories
        .create_subcategory(NewSubcategory {
            uuid: SubcategoryUuid::new(),
            category_uuid: category,
            name: name.to_string(),
            slug: None,
        })
        .await
}

pub(crate) async fn create_specification(
    ctx: &TestContext,
    category: CategoryUuid,
    name: &str,
    kind: SpecificationKind,
) -> Result<Specification, SpecificationsServiceError> {
    ctx.specifications
        .create_specification(NewSpecification {
            uuid: SpecificationUuid::new(),
            category_uuid: category,
            name: name.to_string(),
            kind,
            unit: None,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    category: CategoryUuid,
    name: &str,
    price: u64,
    stock: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(new_product(category, name, price, stock))
        .await
}

pub(crate) async fn create_branded_product(
    ctx: &TestContext,
    category: CategoryUuid,
    brand: BrandUuid,
    name: &str,
    price: u64,
    stock: u32,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            brand_uuid: Some(brand),
            ..new_product(category, name, price, stock)
        })
        .await
}

pub(crate) async fn create_product_with_specification(
    ctx: &TestContext,
    category: CategoryUuid,
    specification: SpecificationUuid,
    value: &str,
) -> Result<Product, ProductsServiceError> {
    ctx.products
        .create_product(NewProduct {
            specifications: vec![NewProductSpecification {
                specification_uuid: specification,
                value: value.to_string(),
            }],
            ..new_product(category, "Dome Tent", 199_00, 3)
        })
        .await
}

/// Overwrite a product's stock behind the services' back.
pub(crate) async fn set_stock(
    ctx: &TestContext,
    product: ProductUuid,
    stock: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE products SET stock = $2 WHERE uuid = $1")
        .bind(product)
        .bind(stock)
        .execute(ctx.db.pool())
        .await?;

    Ok(())
}

/// Place an order for one tent on behalf of a checkout-ready user.
pub(crate) async fn place_order(ctx: &TestContext) -> TestResult<Order> {
    let user = create_checkout_user(ctx).await?;
    let gear = create_category(ctx, "Gear").await?;
    let tent = create_product(ctx, gear.uuid, "Ridge Tent", 120_00, 3).await?;

    ctx.carts
        .add_item(CartOwner::user(Uuid::now_v7(), user.uuid), tent.uuid)
        .await?;

    Ok(ctx.orders.place_order(user.uuid).await?)
}
