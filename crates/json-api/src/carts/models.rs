//! Cart and price response models.

use emporium::{
    cart::{CartLine, CartLines},
    money::CURRENCY,
    pricing::{CartPrices, PricingError, PricingPolicy},
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::carts::models::{Cart, CartUpdate};

/// One line of a cart or order.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LineResponse {
    pub product_uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub quantity: u32,

    /// Unit price in cents at the time the line was added
    pub price: u64,

    /// `price * quantity` in cents
    pub line_total: u64,
}

impl From<CartLine> for LineResponse {
    fn from(line: CartLine) -> Self {
        LineResponse {
            product_uuid: line.product,
            line_total: line.price.saturating_mul(u64::from(line.quantity)),
            name: line.name,
            slug: line.slug,
            image: line.image,
            quantity: line.quantity,
            price: line.price,
        }
    }
}

/// Price breakdown in cents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PricesResponse {
    pub items_price: u64,
    pub shipping_price: u64,
    pub tax_price: u64,
    pub total_price: u64,

    /// ISO 4217 code every amount is held in
    pub currency: String,
}

impl From<CartPrices> for PricesResponse {
    fn from(prices: CartPrices) -> Self {
        PricesResponse {
            items_price: prices.items_price,
            shipping_price: prices.shipping_price,
            tax_price: prices.tax_price,
            total_price: prices.total_price,
            currency: CURRENCY.iso_alpha_code.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// `None` until the first item is added
    pub uuid: Option<Uuid>,

    pub items: Vec<LineResponse>,

    /// Units across every line
    pub item_count: u64,

    pub prices: PricesResponse,
}

impl CartResponse {
    /// What a shopper without a cart sees, priced like any other empty cart.
    pub(crate) fn empty(policy: &PricingPolicy) -> Result<Self, PricingError> {
        Ok(CartResponse {
            uuid: None,
            items: Vec::new(),
            item_count: 0,
            prices: CartLines::new().price(policy)?.into(),
        })
    }
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            uuid: Some(cart.uuid.into()),
            item_count: cart.items.units(),
            items: cart.items.into_iter().map(LineResponse::from).collect(),
            prices: cart.prices.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartUpdateResponse {
    /// Human readable summary such as "Ridge Tent added to cart"
    pub message: String,

    pub cart: CartResponse,
}

impl From<CartUpdate> for CartUpdateResponse {
    fn from(update: CartUpdate) -> Self {
        CartUpdateResponse {
            message: update.message,
            cart: update.cart.into(),
        }
    }
}
