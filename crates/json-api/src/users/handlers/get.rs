//! Get User Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, models::UserResponse},
};

/// Get User Handler
#[endpoint(
    tags("admin"),
    summary = "Get User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "User found"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .get_user(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::users::{UsersServiceError, models::Role};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, make_user, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/users/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_user_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_user()
            .once()
            .withf(|uuid| *uuid == TEST_USER_UUID)
            .return_once(|_| Ok(make_user(Role::User)));

        let response: UserResponse =
            TestClient::get(format!("http://example.com/admin/users/{TEST_USER_UUID}"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.email, "ada@example.com");
        assert_eq!(response.role, "user");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_not_found_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_get_user()
            .once()
            .return_once(|_| Err(UsersServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/admin/users/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
