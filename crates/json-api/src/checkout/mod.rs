//! Checkout
//!
//! Step tracking plus the address and payment method forms.

pub(crate) mod handlers;

pub(crate) use handlers::*;
