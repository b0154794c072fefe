//! Money

use rusty_money::{Money, iso};
use thiserror::Error;

/// A price denominated in the store currency.
pub type Price = Money<'static, iso::Currency>;

/// Currency every amount in the store is held in.
pub const CURRENCY: &iso::Currency = iso::EUR;

/// Errors converting between stored minor units and [`Price`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyConversionError {
    /// The amount does not fit into a signed 64-bit minor unit value.
    #[error("amount {0} is too large to represent")]
    Overflow(u64),

    /// Stored amounts are never negative.
    #[error("amount cannot be negative")]
    Negative,
}

/// Build a [`Price`] from an amount in cents.
///
/// # Errors
///
/// Returns [`MoneyConversionError::Overflow`] when `minor` exceeds `i64::MAX`.
pub fn eur(minor: u64) -> Result<Price, MoneyConversionError> {
    let minor_i64 =
        i64::try_from(minor).map_err(|_overflow| MoneyConversionError::Overflow(minor))?;

    Ok(Money::from_minor(minor_i64, CURRENCY))
}

/// Convert a [`Price`] back into cents.
///
/// # Errors
///
/// Returns [`MoneyConversionError::Negative`] for negative prices.
pub fn to_minor(price: &Price) -> Result<u64, MoneyConversionError> {
    u64::try_from(price.to_minor_units()).map_err(|_negative| MoneyConversionError::Negative)
}
