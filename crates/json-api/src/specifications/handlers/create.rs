//! Create Specification Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use emporium::specifications::SpecificationKind;
use emporium_app::domain::specifications::models::{NewSpecification, SpecificationUuid};

use crate::{
    extensions::*,
    specifications::{
        errors::into_status_error,
        models::{CreateSpecificationRequest, SpecificationResponse},
    },
    state::State,
};

/// Create Specification Handler
#[endpoint(
    tags("admin"),
    summary = "Create Specification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Specification created"),
        (status_code = StatusCode::CONFLICT, description = "Name is already used in this category"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown kind or category"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateSpecificationRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SpecificationResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let kind: SpecificationKind = request.kind.parse().or_400()?;

    let specification = state
        .app
        .specifications
        .create_specification(NewSpecification {
            uuid: SpecificationUuid::new(),
            category_uuid: request.category_uuid.into(),
            name: request.name,
            kind,
            unit: request.unit,
        })
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(specification.into()))
}

#[cfg(test)]
mod tests {
    use emporium_app::domain::specifications::{
        SpecificationsServiceError, models::Specification,
    };
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use crate::test_helpers::{Mocks, service};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service(mocks, Router::with_path("admin/specifications").post(handler))
    }

    #[tokio::test]
    async fn test_create_specification_parses_kind() -> TestResult {
        let category = Uuid::now_v7();

        let mut mocks = Mocks::default();

        mocks
            .specifications
            .expect_create_specification()
            .once()
            .withf(|new| new.kind == SpecificationKind::Boolean && new.unit.is_none())
            .return_once(|new| {
                Ok(Specification {
                    uuid: new.uuid,
                    category_uuid: new.category_uuid,
                    name: new.name,
                    kind: new.kind,
                    unit: new.unit,
                    created_at: Timestamp::UNIX_EPOCH,
                    updated_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/admin/specifications")
            .json(&json!({
                "category_uuid": category,
                "name": "Waterproof",
                "kind": "boolean",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: SpecificationResponse = res.take_json().await?;

        assert_eq!(body.category_uuid, category);
        assert_eq!(body.kind, "boolean");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_kind_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.specifications.expect_create_specification().never();

        let res = TestClient::post("http://example.com/admin/specifications")
            .json(&json!({
                "category_uuid": Uuid::now_v7(),
                "name": "Colour",
                "kind": "colour",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_name_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .specifications
            .expect_create_specification()
            .once()
            .return_once(|_| Err(SpecificationsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/admin/specifications")
            .json(&json!({
                "category_uuid": Uuid::now_v7(),
                "name": "Weight",
                "kind": "number",
                "unit": "kg",
            }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
