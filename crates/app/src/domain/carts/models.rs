//! Cart Models

use emporium::{cart::CartLines, pricing::CartPrices};
use jiff::Timestamp;
use uuid::Uuid;

use crate::{domain::users::models::UserUuid, uuids::TypedUuid};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// Who a cart belongs to.
///
/// A signed-in user's cart takes precedence over the anonymous session cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartOwner {
    pub session: Uuid,
    pub user: Option<UserUuid>,
}

impl CartOwner {
    #[must_use]
    pub fn guest(session: Uuid) -> Self {
        Self {
            session,
            user: None,
        }
    }

    #[must_use]
    pub fn user(session: Uuid, user: UserUuid) -> Self {
        Self {
            session,
            user: Some(user),
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub session_cart_id: Uuid,
    pub user_uuid: Option<UserUuid>,
    pub items: CartLines,
    pub prices: CartPrices,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The cart after an add or remove, with a message describing the change.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    pub cart: Cart,
    pub message: String,
}
