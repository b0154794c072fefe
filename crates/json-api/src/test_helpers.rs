//! Test helpers.

use std::sync::Arc;

use emporium::{
    cart::{CartLine, CartLines},
    checkout::{PaymentMethod, ShippingAddress},
    pricing::{CartPrices, PricingPolicy},
};
use emporium_app::{
    context::AppContext,
    domain::{
        brands::{
            MockBrandsService,
            models::{Brand, BrandUuid},
        },
        carts::{
            MockCartsService,
            models::{Cart, CartUuid},
        },
        categories::{
            MockCategoriesService,
            models::{Category, CategoryUuid},
        },
        features::MockFeaturesService,
        orders::{
            MockOrdersService,
            models::{Order, OrderUuid},
        },
        products::{
            MockProductsService,
            models::{Product, ProductUuid},
        },
        specifications::MockSpecificationsService,
        subcategories::MockSubcategoriesService,
        users::{
            MockUsersService,
            models::{Role, User, UserUuid},
        },
    },
};
use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{auth::middleware::identify, carts::session::session_cart, state::State};

pub(crate) const TEST_TOKEN: &str = "em_v1_01900000-0000-7000-8000-000000000001.c0ffee";

pub(crate) const TEST_SESSION: Uuid = Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0042);

pub(crate) const TEST_USER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0190_0000_0000_7000_8000_0000_0000_0001));

/// One mock per service. Any call without an expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) categories: MockCategoriesService,
    pub(crate) subcategories: MockSubcategoriesService,
    pub(crate) brands: MockBrandsService,
    pub(crate) specifications: MockSpecificationsService,
    pub(crate) features: MockFeaturesService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            categories: Arc::new(self.categories),
            subcategories: Arc::new(self.subcategories),
            brands: Arc::new(self.brands),
            specifications: Arc::new(self.specifications),
            features: Arc::new(self.features),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            pricing: PricingPolicy::default(),
        })
    }
}

/// Mount `route` behind the same state, identity and session hoops the server uses.
pub(crate) fn service(mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(identify)
            .hoop(session_cart)
            .push(route),
    )
}

/// Make [`TEST_TOKEN`] authenticate as `user`.
pub(crate) fn signed_in(mocks: &mut Mocks, user: User) {
    mocks
        .users
        .expect_authenticate()
        .withf(|token| token == TEST_TOKEN)
        .returning(move |_| Ok(user.clone()));
}

pub(crate) fn bearer() -> String {
    format!("Bearer {TEST_TOKEN}")
}

pub(crate) fn storage_error() -> sqlx::Error {
    sqlx::Error::PoolTimedOut
}

pub(crate) fn make_user(role: Role) -> User {
    User {
        uuid: TEST_USER_UUID,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        role,
        address: None,
        payment_method: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
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

/// A signed-in customer with everything checkout needs on file.
pub(crate) fn make_checkout_user() -> User {
    User {
        address: Some(shipping_address()),
        payment_method: Some(PaymentMethod::PayPal),
        ..make_user(Role::User)
    }
}

pub(crate) fn make_category(name: &str, slug: &str) -> Category {
    Category {
        uuid: CategoryUuid::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_brand(name: &str, slug: &str) -> Brand {
    Brand {
        uuid: BrandUuid::new(),
        name: name.to_string(),
        slug: slug.to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Ridge Tent".to_string(),
        slug: "ridge-tent".to_string(),
        description: "Two person tent".to_string(),
        category_uuid: CategoryUuid::new(),
        subcategory_uuid: None,
        brand_uuid: None,
        price: 120_00,
        stock: 3,
        is_featured: false,
        image: None,
        specifications: Vec::new(),
        features: vec!["waterproof".to_string()],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_line(product: ProductUuid, quantity: u32) -> CartLine {
    CartLine {
        product: product.into_uuid(),
        name: "Ridge Tent".to_string(),
        slug: "ridge-tent".to_string(),
        quantity,
        price: 120_00,
        image: None,
    }
}

pub(crate) fn make_cart(lines: Vec<CartLine>) -> Cart {
    Cart {
        uuid: CartUuid::new(),
        session_cart_id: TEST_SESSION,
        user_uuid: None,
        items: CartLines::from(lines),
        prices: CartPrices {
            items_price: 120_00,
            shipping_price: 0,
            tax_price: 25_20,
            total_price: 145_20,
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid) -> Order {
    Order {
        uuid,
        user_uuid: Some(TEST_USER_UUID),
        shipping_address: shipping_address(),
        payment_method: PaymentMethod::PayPal,
        items: vec![make_line(ProductUuid::new(), 1)],
        prices: CartPrices {
            items_price: 120_00,
            shipping_price: 0,
            tax_price: 25_20,
            total_price: 145_20,
        },
        paid_at: None,
        delivered_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
