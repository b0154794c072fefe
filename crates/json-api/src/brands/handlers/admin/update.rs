//! Update Brand Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use crate::{
    brands::{
        errors::into_status_error,
        models::{BrandRequest, BrandResponse},
    },
    extensions::*,
    state::State,
};

/// Update Brand Handler
#[endpoint(
    tags("admin"),
    summary = "Update Brand",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Brand updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Brand not found"),
        (status_code = StatusCode::CONFLICT, description = "Brand slug is already taken"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<BrandRequest>,
    depot: &mut Depot,
) -> Result<Json<BrandResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let brand = state
        .app
        .brands
        .update_brand(uuid.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(brand.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::brands::BrandsServiceError;
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/brands/{uuid}").put(handler))
    }

    #[tokio::test]
    async fn test_missing_brand_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .brands
            .expect_update_brand()
            .once()
            .withf(|_, update| update.name == "Summit" && update.slug.is_none())
            .return_once(|_, _| Err(BrandsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/admin/brands/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Summit" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
