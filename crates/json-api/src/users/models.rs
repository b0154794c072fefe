//! User response models.

use emporium::checkout::ShippingAddress;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use emporium_app::domain::users::models::User;

/// Shipping address as sent and returned over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddressBody {
    /// Recipient name
    pub full_name: String,

    /// Street and number
    pub street_address: String,

    pub city: String,

    pub postal_code: String,

    pub country: String,
}

impl From<ShippingAddress> for AddressBody {
    fn from(address: ShippingAddress) -> Self {
        Self {
            full_name: address.full_name,
            street_address: address.street_address,
            city: address.city,
            postal_code: address.postal_code,
            country: address.country,
        }
    }
}

impl From<AddressBody> for ShippingAddress {
    fn from(body: AddressBody) -> Self {
        Self {
            full_name: body.full_name,
            street_address: body.street_address,
            city: body.city,
            postal_code: body.postal_code,
            country: body.country,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    /// The unique identifier of the user
    pub uuid: Uuid,

    pub name: String,

    /// Lowercased email address
    pub email: String,

    /// `user` or `admin`
    pub role: String,

    /// Shipping address on file, if any
    pub address: Option<AddressBody>,

    /// Preferred payment method, if any
    pub payment_method: Option<String>,

    /// The date and time the account was created
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            name: user.name,
            email: user.email,
            role: user.role.to_string(),
            address: user.address.map(Into::into),
            payment_method: user.payment_method.map(|method| method.as_str().to_string()),
            created_at: user.created_at.to_string(),
        }
    }
}

/// One page of users.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,

    /// Total users across all pages
    pub total: u64,

    pub page: u32,

    pub pages: u64,
}
