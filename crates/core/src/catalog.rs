//! Catalog
//!
//! Product search parameters: text filter, category and brand slugs, a price range, sort order
//! and pagination.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Errors parsing catalog query parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogQueryError {
    /// Price range was not `min-max`.
    #[error("price range must look like `min-max`")]
    MalformedPriceRange,

    /// Lower bound exceeds the upper bound.
    #[error("price range minimum {min} is above maximum {max}")]
    InvertedPriceRange {
        /// Lower bound.
        min: u64,

        /// Upper bound.
        max: u64,
    },

    /// Unknown sort key.
    #[error("unknown sort order `{0}`")]
    UnknownSort(String),
}

/// Inclusive price range in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound.
    pub min: u64,

    /// Upper bound.
    pub max: u64,
}

impl PriceRange {
    /// Build a range, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogQueryError::InvertedPriceRange`] when `min > max`.
    pub fn new(min: u64, max: u64) -> Result<Self, CatalogQueryError> {
        if min > max {
            return Err(CatalogQueryError::InvertedPriceRange { min, max });
        }

        Ok(Self { min, max })
    }

    /// Whether `price` falls inside the range.
    pub fn contains(&self, price: u64) -> bool {
        (self.min..=self.max).contains(&price)
    }
}

impl FromStr for PriceRange {
    type Err = CatalogQueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (min, max) = value
            .trim()
            .split_once('-')
            .ok_or(CatalogQueryError::MalformedPriceRange)?;

        let min = min
            .trim()
            .parse()
            .map_err(|_err| CatalogQueryError::MalformedPriceRange)?;

        let max = max
            .trim()
            .parse()
            .map_err(|_err| CatalogQueryError::MalformedPriceRange)?;

        Self::new(min, max)
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Product listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,

    /// Cheapest first.
    Lowest,

    /// Most expensive first.
    Highest,

    /// Alphabetical by name.
    Name,
}

impl ProductSort {
    /// Query-string name.
    pub const fn as_str(self) -> &'static str {
        match self {
            ProductSort::Newest => "newest",
            ProductSort::Lowest => "lowest",
            ProductSort::Highest => "highest",
            ProductSort::Name => "name",
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductSort {
    type Err = CatalogQueryError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(ProductSort::Newest),
            "lowest" => Ok(ProductSort::Lowest),
            "highest" => Ok(ProductSort::Highest),
            "name" => Ok(ProductSort::Name),
            _ => Err(CatalogQueryError::UnknownSort(value.to_string())),
        }
    }
}

/// One-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    /// Build a page request, clamping the number to at least 1 and the size to `1..=100`.
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Page number, starting at 1.
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Items per page.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }

    /// Rows to fetch.
    pub fn limit(&self) -> u64 {
        u64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// Product search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Case-insensitive text matched against name and description.
    pub query: Option<String>,

    /// Category slug.
    pub category: Option<String>,

    /// Brand slug.
    pub brand: Option<String>,

    /// Price range in minor units.
    pub price: Option<PriceRange>,

    /// Result ordering.
    pub sort: ProductSort,

    /// Requested page.
    pub page: Page,
}

impl ProductQuery {
    /// Text filter with surrounding whitespace removed, `None` when blank.
    pub fn text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }
}

/// A page of results together with the total match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Total matches across all pages.
    pub total: u64,

    /// The page that was served.
    pub page: Page,
}

impl<T> Paginated<T> {
    /// Number of pages needed to show every match.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.page.limit().max(1))
    }

    /// Transform the items while keeping the paging information.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
        }
    }
}
