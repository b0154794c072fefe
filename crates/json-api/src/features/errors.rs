//! Feature Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::features::FeaturesServiceError;

pub(crate) fn into_status_error(error: FeaturesServiceError) -> StatusError {
    match error {
        FeaturesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Feature already exists")
        }
        FeaturesServiceError::NotFound => StatusError::not_found().brief("Feature not found"),
        FeaturesServiceError::MissingRequiredData | FeaturesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid feature payload")
        }
        FeaturesServiceError::Sql(source) => {
            error!("feature storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
