//! User Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::users::UsersServiceError;

pub(crate) fn into_status_error(error: UsersServiceError) -> StatusError {
    match error {
        UsersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Email address is already registered")
        }
        UsersServiceError::NotFound => StatusError::not_found().brief("User not found"),
        UsersServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        UsersServiceError::InvalidToken => {
            StatusError::unauthorized().brief("Invalid or expired session token")
        }
        UsersServiceError::NameTooShort
        | UsersServiceError::PasswordTooShort
        | UsersServiceError::InvalidEmail
        | UsersServiceError::InvalidAddress(_) => {
            StatusError::bad_request().brief(error.to_string())
        }
        UsersServiceError::MissingRequiredData | UsersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid user payload")
        }
        UsersServiceError::PasswordHash(source) => {
            error!("failed to hash password: {source}");

            StatusError::internal_server_error()
        }
        UsersServiceError::Sql(source) => {
            error!("user storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
