//! Order Models

use emporium::{
    cart::CartLine,
    checkout::{PaymentMethod, ShippingAddress},
    pricing::CartPrices,
};
use jiff::Timestamp;

use crate::{
    domain::users::models::{Role, User, UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Model
///
/// Lines, prices, address and payment method are copied from the cart and user at the time the
/// order was placed.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,

    /// Cleared when the user is deleted.
    pub user_uuid: Option<UserUuid>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartLine>,
    pub prices: CartPrices,
    pub paid_at: Option<Timestamp>,
    pub delivered_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    #[must_use]
    pub fn is_delivered(&self) -> bool {
        self.delivered_at.is_some()
    }
}

/// The user asking to see an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderViewer {
    pub user: UserUuid,
    pub role: Role,
}

impl OrderViewer {
    /// Whether this viewer may see `order`.
    #[must_use]
    pub fn can_view(&self, order: &Order) -> bool {
        self.role.is_admin() || order.user_uuid == Some(self.user)
    }
}

impl From<&User> for OrderViewer {
    fn from(user: &User) -> Self {
        Self {
            user: user.uuid,
            role: user.role,
        }
    }
}
