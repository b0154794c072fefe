//! Feature Handlers

pub(crate) mod admin;
pub(crate) mod index;
