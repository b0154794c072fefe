//! Brands

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::BrandsServiceError;
pub use service::*;
