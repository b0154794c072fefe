//! Auth middleware.

use std::sync::Arc;

use emporium_app::domain::users::UsersServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::error;

use crate::{extensions::*, state::State};

/// Resolve an optional bearer token into the signed-in user.
///
/// Requests without an `Authorization` header pass through anonymously. A token that does not
/// resolve to a live session is rejected with 401.
#[salvo::handler]
pub(crate) async fn identify(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = bearer_token(req).map(ToString::to_string) else {
        ctrl.call_next(req, depot, res).await;

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    match state.app.users.authenticate(&token).await {
        Ok(user) => depot.insert_user(user),
        Err(UsersServiceError::InvalidToken | UsersServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("Invalid or expired session token"));
            ctrl.skip_rest();

            return;
        }
        Err(source) => {
            error!("failed to authenticate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

/// Reject anonymous requests.
#[salvo::handler]
pub(crate) async fn require_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if let Err(error) = depot.user_or_401() {
        res.render(error);
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

/// Reject anonymous requests with 401 and signed-in non-admins with 403.
#[salvo::handler]
pub(crate) async fn require_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match depot.user_or_401() {
        Ok(user) if user.is_admin() => {}
        Ok(_) => {
            res.render(StatusError::forbidden().brief("Admin access required"));
            ctrl.skip_rest();

            return;
        }
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    }

    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.splitn(2, ' ');

    let scheme = parts.next()?;
    let token = parts.next()?.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token)
}
