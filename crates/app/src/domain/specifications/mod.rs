//! Specifications

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::SpecificationsServiceError;
pub use service::*;
