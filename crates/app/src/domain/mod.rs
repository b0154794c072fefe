//! Emporium Domain Concerns

pub mod brands;
pub mod carts;
pub mod categories;
pub mod features;
pub mod orders;
pub mod products;
pub mod specifications;
pub mod subcategories;
pub mod users;

mod slugs;
