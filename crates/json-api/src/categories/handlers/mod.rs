//! Category Handlers

pub(crate) mod admin;
pub(crate) mod get;
pub(crate) mod index;
