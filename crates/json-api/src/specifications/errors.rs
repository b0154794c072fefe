//! Specification Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::specifications::SpecificationsServiceError;

pub(crate) fn into_status_error(error: SpecificationsServiceError) -> StatusError {
    match error {
        SpecificationsServiceError::AlreadyExists => StatusError::conflict()
            .brief("A specification with this name already exists in the category"),
        SpecificationsServiceError::NotFound => {
            StatusError::not_found().brief("Specification not found")
        }
        SpecificationsServiceError::InUse => {
            StatusError::conflict().brief("Products already carry values of this kind")
        }
        SpecificationsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category")
        }
        SpecificationsServiceError::MissingRequiredData
        | SpecificationsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid specification payload")
        }
        SpecificationsServiceError::Sql(source) => {
            error!("specification storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
