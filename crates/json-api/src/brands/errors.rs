//! Brand Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::brands::BrandsServiceError;

pub(crate) fn into_status_error(error: BrandsServiceError) -> StatusError {
    match error {
        BrandsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Brand slug is already taken")
        }
        BrandsServiceError::NotFound => StatusError::not_found().brief("Brand not found"),
        BrandsServiceError::InUse => {
            StatusError::conflict().brief("Brand still has active products")
        }
        BrandsServiceError::InvalidReference
        | BrandsServiceError::MissingRequiredData
        | BrandsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid brand payload")
        }
        BrandsServiceError::Sql(source) => {
            error!("brand storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use crate::test_helpers::storage_error;

    use super::*;

    #[test]
    fn test_in_use_maps_to_conflict() {
        let error = into_status_error(BrandsServiceError::InUse);

        assert_eq!(error.code, StatusCode::CONFLICT);
        assert_eq!(error.brief, "Brand still has active products");
    }

    #[test]
    fn test_storage_errors_are_hidden() {
        let error = into_status_error(BrandsServiceError::Sql(storage_error()));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
