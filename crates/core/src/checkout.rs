//! Checkout
//!
//! Shipping address and payment method validation, and the order in which checkout steps are
//! unlocked.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shipping address captured during checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    /// Recipient name.
    pub full_name: String,

    /// Street and number.
    pub street_address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub postal_code: String,

    /// Country.
    pub country: String,
}

/// Address validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// A field is shorter than allowed.
    #[error("{field} must be at least {min} characters")]
    TooShort {
        /// Field name.
        field: &'static str,

        /// Minimum trimmed length.
        min: usize,
    },
}

impl ShippingAddress {
    /// Trim every field and check minimum lengths.
    ///
    /// # Errors
    ///
    /// Returns [`AddressError::TooShort`] for the first field that is too short.
    pub fn validate(self) -> Result<Self, AddressError> {
        let address = Self {
            full_name: self.full_name.trim().to_string(),
            street_address: self.street_address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
        };

        for (field, value, min) in [
            ("full_name", &address.full_name, 3),
            ("street_address", &address.street_address, 3),
            ("city", &address.city, 3),
            ("postal_code", &address.postal_code, 2),
            ("country", &address.country, 3),
        ] {
            if value.chars().count() < min {
                return Err(AddressError::TooShort { field, min });
            }
        }

        Ok(address)
    }
}

/// Supported payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// `PayPal`.
    #[default]
    PayPal,

    /// Stripe card payment.
    Stripe,

    /// Cash on delivery.
    CashOnDelivery,
}

/// Unknown payment method name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method `{0}`")]
pub struct UnknownPaymentMethod(pub String);

impl PaymentMethod {
    /// Every supported method.
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::PayPal,
        PaymentMethod::Stripe,
        PaymentMethod::CashOnDelivery,
    ];

    /// Stored name.
    pub const fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::PayPal => "PayPal",
            PaymentMethod::Stripe => "Stripe",
            PaymentMethod::CashOnDelivery => "CashOnDelivery",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownPaymentMethod(value.to_string()))
    }
}

/// Checkout steps in the order a shopper completes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Cart is empty; add items first.
    Cart,

    /// Shopper must sign in.
    SignIn,

    /// Shipping address is missing.
    ShippingAddress,

    /// Payment method is missing.
    PaymentMethod,

    /// Everything is in place.
    PlaceOrder,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::SignIn => "sign_in",
            CheckoutStep::ShippingAddress => "shipping_address",
            CheckoutStep::PaymentMethod => "payment_method",
            CheckoutStep::PlaceOrder => "place_order",
        })
    }
}

/// What is known about the shopper at checkout time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent facts about the shopper"
)]
pub struct CheckoutState {
    /// Cart has at least one line.
    pub has_items: bool,

    /// Shopper is authenticated.
    pub signed_in: bool,

    /// A shipping address is on file.
    pub has_address: bool,

    /// A payment method is on file.
    pub has_payment_method: bool,
}

impl CheckoutState {
    /// The first step that still needs attention.
    pub fn next_step(&self) -> CheckoutStep {
        if !self.has_items {
            CheckoutStep::Cart
        } else if !self.signed_in {
            CheckoutStep::SignIn
        } else if !self.has_address {
            CheckoutStep::ShippingAddress
        } else if !self.has_payment_method {
            CheckoutStep::PaymentMethod
        } else {
            CheckoutStep::PlaceOrder
        }
    }
}
