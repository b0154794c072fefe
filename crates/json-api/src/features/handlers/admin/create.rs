//! Create Feature Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use emporium_app::domain::features::models::{FeatureUuid, NewFeature};

use crate::{
    extensions::*,
    features::{
        errors::into_status_error,
        models::{FeatureRequest, FeatureResponse},
    },
    state::State,
};

/// Create Feature Handler
#[endpoint(
    tags("admin"),
    summary = "Create Feature",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Feature created"),
        (status_code = StatusCode::CONFLICT, description = "Feature already exists"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<FeatureRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<FeatureResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let feature = state
        .app
        .features
        .create_feature(NewFeature {
            uuid: FeatureUuid::new(),
            name: json.into_inner().name,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(feature.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::features::{FeaturesServiceError, models::Feature};
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/features").post(handler))
    }

    #[tokio::test]
    async fn test_create_feature() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .features
            .expect_create_feature()
            .once()
            .withf(|new| new.name == "Waterproof")
            .return_once(|new| {
                Ok(Feature {
                    uuid: new.uuid,
                    name: new.name,
                    slug: "waterproof".to_string(),
                    created_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/admin/features")
            .json(&json!({ "name": "Waterproof" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: FeatureResponse = res.take_json().await?;

        assert_eq!(body.slug, "waterproof");

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_feature_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .features
            .expect_create_feature()
            .once()
            .return_once(|_| Err(FeaturesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/features")
            .json(&json!({ "name": "waterproof" }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
