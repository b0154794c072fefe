//! Feature Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    features::{
        errors::into_status_error,
        models::{FeatureResponse, FeaturesResponse},
    },
    state::State,
};

/// Feature Index Handler
#[endpoint(tags("catalog"), summary = "List Features")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FeaturesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let features = state
        .app
        .features
        .list_features()
        .await
        .map_err(into_status_error)?;

    Ok(Json(FeaturesResponse {
        features: features.into_iter().map(FeatureResponse::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::features::FeaturesServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service, storage_error};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("features").get(handler))
    }

    #[tokio::test]
    async fn test_storage_error_returns_500() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .features
            .expect_list_features()
            .once()
            .return_once(|| Err(FeaturesServiceError::Sql(storage_error())));

        let res = TestClient::get("http://example.com/features")
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
