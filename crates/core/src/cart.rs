//! Cart
//!
//! Line-item bookkeeping for a shopping cart. A product appears at most once; adding it again
//! bumps the quantity, removing it steps the quantity down until the line disappears.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::{CartPrices, PricingError, PricingPolicy, calc_price};

/// Errors raised while changing cart lines.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The requested quantity exceeds the available stock.
    #[error("not enough stock")]
    NotEnoughStock,

    /// The product is not in the cart.
    #[error("item not found in cart")]
    ItemNotFound,

    /// Quantity would not fit into a `u32`.
    #[error("quantity overflowed")]
    QuantityOverflow,
}

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product in this line.
    pub product: Uuid,

    /// Product name at the time it was added.
    pub name: String,

    /// Product slug at the time it was added.
    pub slug: String,

    /// Number of units.
    pub quantity: u32,

    /// Unit price in cents, snapshotted when the line was created.
    pub price: u64,

    /// Optional product image reference.
    pub image: Option<String>,
}

/// What a cart operation did to the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added,

    /// An existing line's quantity went up.
    Incremented {
        /// Quantity after the change.
        quantity: u32,
    },

    /// An existing line's quantity went down.
    Decremented {
        /// Quantity after the change.
        quantity: u32,
    },

    /// The line was removed from the cart.
    Removed,
}

impl CartChange {
    /// Human readable outcome for the given product name.
    pub fn message(self, name: &str) -> String {
        match self {
            CartChange::Added => format!("{name} added to cart"),
            CartChange::Incremented { .. } | CartChange::Decremented { .. } => {
                format!("{name} updated in cart")
            }
            CartChange::Removed => format!("{name} removed from cart"),
        }
    }
}

/// The ordered lines of a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    /// Create an empty set of lines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the lines.
    pub fn as_slice(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across every line.
    pub fn units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Find the line for a product.
    pub fn get(&self, product: Uuid) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product == product)
    }

    /// Add one unit of `line.product`.
    ///
    /// A new line is created with quantity 1 when the product is absent; otherwise the existing
    /// line is incremented and its original price snapshot kept.
    ///
    /// # Errors
    ///
    /// - [`CartError::NotEnoughStock`]: the resulting quantity exceeds `available_stock`.
    /// - [`CartError::QuantityOverflow`]: the quantity cannot be incremented further.
    pub fn add(&mut self, line: CartLine, available_stock: u32) -> Result<CartChange, CartError> {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.product == line.product) {
            let quantity = existing
                .quantity
                .checked_add(1)
                .ok_or(CartError::QuantityOverflow)?;

            if quantity > available_stock {
                return Err(CartError::NotEnoughStock);
            }

            existing.quantity = quantity;

            return Ok(CartChange::Incremented { quantity });
        }

        if available_stock < 1 {
            return Err(CartError::NotEnoughStock);
        }

        self.lines.push(CartLine { quantity: 1, ..line });

        Ok(CartChange::Added)
    }

    /// Remove one unit of `product`, dropping the line when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when the product is not in the cart.
    pub fn remove(&mut self, product: Uuid) -> Result<CartChange, CartError> {
        let position = self
            .lines
            .iter()
            .position(|line| line.product == product)
            .ok_or(CartError::ItemNotFound)?;

        let Some(line) = self.lines.get_mut(position) else {
            return Err(CartError::ItemNotFound);
        };

        if line.quantity <= 1 {
            self.lines.remove(position);

            return Ok(CartChange::Removed);
        }

        line.quantity -= 1;

        Ok(CartChange::Decremented {
            quantity: line.quantity,
        })
    }

    /// Fold `other` into these lines, capping every quantity at the product's stock.
    ///
    /// Lines whose product has no stock left are dropped.
    pub fn merge<F>(&mut self, other: CartLines, mut stock_of: F)
    where
        F: FnMut(Uuid) -> u32,
    {
        for incoming in other.lines {
            if let Some(existing) = self
                .lines
                .iter_mut()
                .find(|line| line.product == incoming.product)
            {
                existing.quantity = existing.quantity.saturating_add(incoming.quantity);
            } else {
                self.lines.push(incoming);
            }
        }

        self.lines.retain_mut(|line| {
            line.quantity = line.quantity.min(stock_of(line.product));

            line.quantity > 0
        });
    }

    /// Price the lines under `policy`.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the calculation overflows.
    pub fn price(&self, policy: &PricingPolicy) -> Result<CartPrices, PricingError> {
        calc_price(&self.lines, policy)
    }
}

impl From<Vec<CartLine>> for CartLines {
    fn from(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }
}

impl From<CartLines> for Vec<CartLine> {
    fn from(lines: CartLines) -> Self {
        lines.lines
    }
}

impl IntoIterator for CartLines {
    type Item = CartLine;
    type IntoIter = std::vec::IntoIter<CartLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}
