//! Checkout Handlers

pub(crate) mod address;
pub(crate) mod get;
pub(crate) mod payment_method;
