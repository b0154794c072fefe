//! Cart Pricing
//!
//! Derives the items, tax, shipping and total prices of a cart from its lines.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::CartLine,
    money::{MoneyConversionError, Price, eur, to_minor},
};

/// Default VAT applied to the items price.
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Default flat shipping fee, in cents.
pub const DEFAULT_SHIPPING_FEE: u64 = 10_00;

/// Items price (in cents) above which shipping is free by default.
pub const DEFAULT_FREE_SHIPPING_OVER: u64 = 100_00;

/// Errors that can occur while pricing a cart.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// A line total or sum did not fit into the supported range.
    #[error("price calculation overflowed")]
    Overflow,

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Converting to or from stored minor units failed.
    #[error(transparent)]
    Conversion(#[from] MoneyConversionError),
}

/// Rates used to price a cart.
#[derive(Debug, Clone, Copy)]
pub struct PricingPolicy {
    /// Tax applied to the items price.
    pub tax_rate: Percentage,

    /// Flat shipping fee in cents.
    pub shipping_fee: u64,

    /// Shipping is waived once the items price is strictly greater than this (cents).
    pub free_shipping_over: u64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: Percentage::from(DEFAULT_TAX_RATE),
            shipping_fee: DEFAULT_SHIPPING_FEE,
            free_shipping_over: DEFAULT_FREE_SHIPPING_OVER,
        }
    }
}

/// Derived cart prices, all in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPrices {
    /// Sum of `price * quantity` over every line.
    pub items_price: u64,

    /// Shipping charged for the cart.
    pub shipping_price: u64,

    /// Tax charged on the items price.
    pub tax_price: u64,

    /// Items, shipping and tax combined.
    pub total_price: u64,
}

/// Price a list of cart lines.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total or the sum overflowed.
/// - [`PricingError::PercentConversion`]: tax could not be represented in cents.
/// - [`PricingError::Money`]: wrapped money arithmetic error.
pub fn calc_price(lines: &[CartLine], policy: &PricingPolicy) -> Result<CartPrices, PricingError> {
    let items = lines
        .iter()
        .try_fold(eur(0)?, |acc, line| -> Result<Price, PricingError> {
            Ok(acc.add(line_total(line)?)?)
        })?;

    let items_price = to_minor(&items)?;

    let shipping_price = if items_price > policy.free_shipping_over {
        0
    } else {
        policy.shipping_fee
    };

    let tax_price = percent_of_minor(&policy.tax_rate, items_price)?;

    let total = items.add(eur(shipping_price)?)?.add(eur(tax_price)?)?;

    Ok(CartPrices {
        items_price,
        shipping_price,
        tax_price,
        total_price: to_minor(&total)?,
    })
}

fn line_total(line: &CartLine) -> Result<Price, PricingError> {
    let minor = line
        .price
        .checked_mul(u64::from(line.quantity))
        .ok_or(PricingError::Overflow)?;

    eur(minor).map_err(|_overflow| PricingError::Overflow)
}

/// Calculate a percentage of an amount in cents, rounded half away from zero.
fn percent_of_minor(percent: &Percentage, minor: u64) -> Result<u64, PricingError> {
    let minor = Decimal::from_u64(minor).ok_or(PricingError::PercentConversion)?;

    ((*percent) * Decimal::ONE)
        .checked_mul(minor)
        .ok_or(PricingError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(PricingError::PercentConversion)
}
