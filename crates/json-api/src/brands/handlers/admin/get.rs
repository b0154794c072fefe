//! Get Brand Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    brands::{errors::into_status_error, models::BrandResponse},
    extensions::*,
    state::State,
};

/// Get Brand Handler
#[endpoint(
    tags("admin"),
    summary = "Get Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Brand found"),
        (status_code = StatusCode::NOT_FOUND, description = "Brand not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brand = state
        .app
        .brands
        .get_brand(uuid.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(brand.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_brand, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/brands/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_brand() -> TestResult {
        let brand = make_brand("Summit", "summit");
        let uuid = brand.uuid;

        let mut mocks = Mocks::default();

        mocks
            .brands
            .expect_get_brand()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(brand));

        let response: BrandResponse =
            TestClient::get(format!("http://example.com/admin/brands/{uuid}"))
                .send(&make_service(mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.slug, "summit");

        Ok(())
    }
}
