//! Subcategory Handlers
//!
//! Listing and creation are nested under their category; update and delete address the
//! subcategory directly.

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod index;
pub(crate) mod update;
