//! Depot helper extensions.

use std::any::Any;

use emporium_app::domain::users::models::User;
use salvo::prelude::{Depot, StatusError};
use uuid::Uuid;

const USER_DEPOT_KEY: &str = "user";
const SESSION_CART_DEPOT_KEY: &str = "session_cart_id";

/// Typed access to what middleware leaves in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_user(&mut self, user: User);

    /// The signed-in user, if the request carried a valid bearer token.
    fn user(&self) -> Option<&User>;

    fn user_or_401(&self) -> Result<&User, StatusError>;

    fn insert_session_cart_id(&mut self, session: Uuid);

    fn session_cart_id_or_500(&self) -> Result<Uuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user(&mut self, user: User) {
        self.insert(USER_DEPOT_KEY, user);
    }

    fn user(&self) -> Option<&User> {
        self.get::<User>(USER_DEPOT_KEY).ok()
    }

    fn user_or_401(&self) -> Result<&User, StatusError> {
        self.user()
            .ok_or_else(|| StatusError::unauthorized().brief("Sign in required"))
    }

    fn insert_session_cart_id(&mut self, session: Uuid) {
        self.insert(SESSION_CART_DEPOT_KEY, session);
    }

    fn session_cart_id_or_500(&self) -> Result<Uuid, StatusError> {
        self.get::<Uuid>(SESSION_CART_DEPOT_KEY)
            .copied()
            .map_err(|_ignored| StatusError::internal_server_error())
    }
}
