//! Delete User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State, users::errors::into_status_error};

/// Delete User Handler
///
/// Removes the account and its sessions. Orders keep their snapshot.
#[endpoint(
    tags("admin"),
    summary = "Delete User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "User deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .users
        .delete_user(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::users::UsersServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/users/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_user_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .withf(|uuid| *uuid == TEST_USER_UUID)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/users/{TEST_USER_UUID}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_user_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_delete_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/admin/users/{TEST_USER_UUID}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
