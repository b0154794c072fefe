//! User Models

use std::{fmt, str::FromStr};

use emporium::checkout::{PaymentMethod, ShippingAddress};
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::users::password::Password, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Session UUID
pub type SessionUuid = TypedUuid<Session>;

/// Default lifetime of a bearer session.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_hours(24 * 30);

/// Minimum name length after trimming.
pub const MIN_NAME_LEN: usize = 3;

/// Minimum password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Access level of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown role `{0}`")]
pub struct UnknownRole(pub String);

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// User Model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,

    /// Always lowercase.
    pub email: String,
    pub role: Role,
    pub address: Option<ShippingAddress>,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// New User Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub password: Password,
    pub role: Role,
}

/// Admin update of a user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserUpdate {
    pub name: String,
    pub role: Role,
}

/// A freshly issued bearer session. The raw token is only available here.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub uuid: SessionUuid,
    pub token: String,
    pub user: User,
    pub expires_at: Timestamp,
}
