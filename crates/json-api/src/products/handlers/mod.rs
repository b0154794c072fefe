//! Product Handlers

pub(crate) mod admin;
pub(crate) mod featured;
pub(crate) mod get;
pub(crate) mod index;
