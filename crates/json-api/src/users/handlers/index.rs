//! User Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    state::State,
    users::{
        errors::into_status_error,
        models::{UserResponse, UsersResponse},
    },
};

/// User Index Handler
///
/// Returns one page of accounts, oldest first.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Users listed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Sign in required"),
        (status_code = StatusCode::FORBIDDEN, description = "Admin access required"),
    ),
)]
pub(crate) async fn handler(
    page: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let users = state
        .app
        .users
        .list_users(page.into_page())
        .await
        .map_err(into_status_error)?;

    let pages = users.total_pages();

    Ok(Json(UsersResponse {
        total: users.total,
        page: users.page.number(),
        pages,
        users: users.items.into_iter().map(UserResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use emporium::catalog::{Page, Paginated};
    use emporium_app::domain::users::models::Role;
    use salvo::{
        http::header::AUTHORIZATION,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, bearer, make_user, service, signed_in};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/users").get(handler))
    }

    #[tokio::test]
    async fn test_index_forwards_page_number() -> TestResult {
        let mut mocks = Mocks::default();

        signed_in(&mut mocks, make_user(Role::Admin));

        mocks
            .users
            .expect_list_users()
            .once()
            .withf(|page| page.number() == 3)
            .return_once(|page| {
                Ok(Paginated {
                    items: vec![make_user(Role::User)],
                    total: 25,
                    page,
                })
            });

        let response: UsersResponse = TestClient::get("http://example.com/admin/users?page=3")
            .add_header(AUTHORIZATION, bearer(), true)
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.users.len(), 1, "expected one user");
        assert_eq!(response.page, 3);
        assert_eq!(response.pages, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_defaults_to_first_page() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .users
            .expect_list_users()
            .once()
            .withf(|page| *page == Page::default())
            .return_once(|page| {
                Ok(Paginated {
                    items: Vec::new(),
                    total: 0,
                    page,
                })
            });

        let response: UsersResponse = TestClient::get("http://example.com/admin/users")
            .send(&make_service(mocks))
            .await
            .take_json()
            .await?;

        assert!(response.users.is_empty());
        assert_eq!(response.pages, 0);

        Ok(())
    }
}
