//! Subcategory Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::subcategories::SubcategoriesServiceError;

pub(crate) fn into_status_error(error: SubcategoriesServiceError) -> StatusError {
    match error {
        SubcategoriesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Subcategory slug is already taken in this category")
        }
        SubcategoriesServiceError::NotFound => {
            StatusError::not_found().brief("Subcategory not found")
        }
        SubcategoriesServiceError::InUse => {
            StatusError::conflict().brief("Subcategory still has active products")
        }
        SubcategoriesServiceError::InvalidReference => {
            StatusError::bad_request().brief("Unknown category")
        }
        SubcategoriesServiceError::MissingRequiredData | SubcategoriesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid subcategory payload")
        }
        SubcategoriesServiceError::Sql(source) => {
            error!("subcategory storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
