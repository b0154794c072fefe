//! Pagination query parsing helpers.

use emporium::catalog::{DEFAULT_PAGE_SIZE, Page};
use salvo::oapi::extract::QueryParam;

pub(crate) trait PageParamExt {
    fn into_page(self) -> Page;
}

impl PageParamExt for QueryParam<u32, false> {
    fn into_page(self) -> Page {
        Page::new(self.into_inner().unwrap_or(1), DEFAULT_PAGE_SIZE)
    }
}
