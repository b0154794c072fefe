//! Extension traits

mod depot;
mod page;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use page::PageParamExt as _;
pub(crate) use result::ResultExt as _;
