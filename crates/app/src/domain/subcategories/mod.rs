//! Subcategories

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::SubcategoriesServiceError;
pub use service::*;
