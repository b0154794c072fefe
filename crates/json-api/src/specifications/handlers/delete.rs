//! Delete Specification Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, specifications::errors::into_status_error, state::State};

/// Delete Specification Handler
///
/// Product values recorded for the specification are removed with it.
#[endpoint(
    tags("admin"),
    summary = "Delete Specification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Specification deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Specification not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .specifications
        .delete_specification(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::specifications::SpecificationsServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/specifications/{uuid}").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_specification() -> TestResult {
        let uuid = Uuid::now_v7();

        let mut mocks = Mocks::default();

        mocks
            .specifications
            .expect_delete_specification()
            .once()
            .withf(move |specification| specification.into_uuid() == uuid)
            .return_once(|_| Ok(()));

        let res = TestClient::delete(format!("http://example.com/admin/specifications/{uuid}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_specification_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .specifications
            .expect_delete_specification()
            .once()
            .return_once(|_| Err(SpecificationsServiceError::NotFound));

        let res = TestClient::delete(format!(
            "http://example.com/admin/specifications/{}",
            Uuid::now_v7()
        ))
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
