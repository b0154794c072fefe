//! Order response models.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium::catalog::Paginated;
use emporium_app::domain::orders::models::Order;

use crate::{
    carts::models::{LineResponse, PricesResponse},
    users::models::AddressBody,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,

    /// `None` once the account has been deleted
    pub user_uuid: Option<Uuid>,

    pub shipping_address: AddressBody,
    pub payment_method: String,
    pub items: Vec<LineResponse>,
    pub prices: PricesResponse,
    pub paid_at: Option<String>,
    pub delivered_at: Option<String>,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            user_uuid: order.user_uuid.map(Into::into),
            shipping_address: order.shipping_address.into(),
            payment_method: order.payment_method.as_str().to_string(),
            items: order.items.into_iter().map(LineResponse::from).collect(),
            prices: order.prices.into(),
            paid_at: order.paid_at.as_ref().map(ToString::to_string),
            delivered_at: order.delivered_at.as_ref().map(ToString::to_string),
            created_at: order.created_at.to_string(),
        }
    }
}

/// One page of orders, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u32,
    pub pages: u64,
}

impl From<Paginated<Order>> for OrdersResponse {
    fn from(orders: Paginated<Order>) -> Self {
        OrdersResponse {
            total: orders.total,
            page: orders.page.number(),
            pages: orders.total_pages(),
            orders: orders.items.into_iter().map(OrderResponse::from).collect(),
        }
    }
}
