//! Emporium
//!
//! Storefront domain logic: cart pricing, cart merging, checkout progression and catalog
//! querying. Everything in this crate is pure; persistence lives in `emporium-app`.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod slug;
pub mod specifications;
