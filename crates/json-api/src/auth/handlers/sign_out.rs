//! Sign Out Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    auth::middleware::bearer_token, extensions::*, state::State, users::errors::into_status_error,
};

/// Sign Out Handler
///
/// Revokes the session behind the presented bearer token.
#[endpoint(
    tags("auth"),
    summary = "Sign Out",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Signed out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(token) = bearer_token(req) else {
        return Err(StatusError::unauthorized().brief("Sign in required"));
    };

    state
        .app
        .users
        .sign_out(token)
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::users::models::Role;
    use salvo::{http::header::AUTHORIZATION, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_TOKEN, bearer, make_user, service, signed_in};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("auth/sign-out").post(handler))
    }

    #[tokio::test]
    async fn test_sign_out_revokes_token() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::User));

        mocks
            .users
            .expect_sign_out()
            .once()
            .withf(|token| token == TEST_TOKEN)
            .return_once(|_| Ok(()));

        let res = TestClient::post("http://example.com/auth/sign-out")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_sign_out_without_token_returns_401() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.users.expect_sign_out().never();

        let res = TestClient::post("http://example.com/auth/sign-out")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
