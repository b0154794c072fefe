//! Users service errors.

use argon2::password_hash;
use emporium::checkout::AddressError;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::users::models::{MIN_NAME_LEN, MIN_PASSWORD_LEN};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("user already exists")]
    AlreadyExists,

    #[error("user not found")]
    NotFound,

    #[error("missing required data")]
    MissingRequiredData,

    #[error("invalid data")]
    InvalidData,

    #[error("name must be at least {min} characters", min = MIN_NAME_LEN)]
    NameTooShort,

    #[error("password must be at least {min} characters", min = MIN_PASSWORD_LEN)]
    PasswordTooShort,

    #[error("email address is invalid")]
    InvalidEmail,

    #[error("invalid shipping address")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("session token is invalid or expired")]
    InvalidToken,

    #[error("password hashing failed")]
    PasswordHash(#[from] password_hash::Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for UsersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation | ErrorKind::ForeignKeyViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
