//! Admin Order Handlers

pub(crate) mod delete;
pub(crate) mod delivered;
pub(crate) mod index;
pub(crate) mod paid;
