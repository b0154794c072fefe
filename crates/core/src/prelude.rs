//! Emporium prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartChange, CartError, CartLine, CartLines},
    catalog::{CatalogQueryError, Page, Paginated, PriceRange, ProductQuery, ProductSort},
    checkout::{
        AddressError, CheckoutState, CheckoutStep, PaymentMethod, ShippingAddress,
        UnknownPaymentMethod,
    },
    money::{CURRENCY, MoneyConversionError, Price, eur, to_minor},
    pricing::{CartPrices, PricingError, PricingPolicy, calc_price},
    slug::{SlugError, slugify, validate_slug},
    specifications::{SpecificationKind, SpecificationValue, SpecificationValueError},
};
