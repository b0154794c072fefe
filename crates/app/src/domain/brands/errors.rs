//! Brands service errors.

use emporium::slug::SlugError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrandsServiceError {
    #[error("brand already exists")]
    AlreadyExists,

    #[error("brand not found")]
    NotFound,

    #[error("related resource not found")]
    InvalidReference,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("brand still has products")]
    InUse,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for BrandsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<SlugError> for BrandsServiceError {
    fn from(_error: SlugError) -> Self {
        Self::InvalidData
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_maps_to_not_found() {
        let error = BrandsServiceError::from(Error::RowNotFound);

        assert!(matches!(error, BrandsServiceError::NotFound));
    }

    #[test]
    fn slug_errors_map_to_invalid_data() {
        let error = BrandsServiceError::from(SlugError::TooLong);

        assert!(matches!(error, BrandsServiceError::InvalidData));
    }
}
