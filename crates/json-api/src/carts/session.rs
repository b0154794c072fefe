//! Session cart identification.

use emporium_app::domain::carts::models::CartOwner;
use salvo::{http::header::HeaderValue, prelude::*};
use tracing::warn;
use uuid::Uuid;

use crate::extensions::*;

/// Header carrying the anonymous cart id between requests.
pub(crate) const SESSION_CART_HEADER: &str = "x-session-cart-id";

/// Read the session cart id from the request, minting one when absent or malformed, and echo it
/// back so the client can keep sending it.
#[salvo::handler]
pub(crate) async fn session_cart(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let session = req
        .headers()
        .get(SESSION_CART_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .unwrap_or_else(Uuid::now_v7);

    depot.insert_session_cart_id(session);

    match HeaderValue::from_str(&session.to_string()) {
        Ok(value) => {
            res.headers_mut().insert(SESSION_CART_HEADER, value);
        }
        Err(error) => warn!("failed to echo session cart id: {error}"),
    }

    ctrl.call_next(req, depot, res).await;
}

/// The signed-in user's cart, or the anonymous session cart.
pub(crate) fn cart_owner(depot: &Depot) -> Result<CartOwner, StatusError> {
    let session = depot.session_cart_id_or_500()?;

    Ok(match depot.user() {
        Some(user) => CartOwner::user(session, user.uuid),
        None => CartOwner::guest(session),
    })
}
