//! Users
//!
//! Accounts, password credentials and bearer sessions.

pub mod errors;
pub mod models;
pub mod password;
mod repository;
pub mod service;
pub mod token;

pub use errors::UsersServiceError;
pub use service::*;
