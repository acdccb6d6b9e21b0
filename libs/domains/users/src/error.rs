use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_shopping::ShoppingError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User with id {0} not found")]
    NotFound(Uuid),

    #[error("Address with id {0} not found")]
    AddressNotFound(Uuid),

    #[error("Email id {0} already exists")]
    DuplicateEmail(String),

    #[error("Mobile number {0} already exists")]
    DuplicateMobile(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Could not be saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Shopping(#[from] ShoppingError),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::AddressNotFound(_) => AppError::NotFound(err.to_string()),
            UserError::DuplicateEmail(_) | UserError::DuplicateMobile(_) => AppError::Conflict(err.to_string()),
            UserError::InvalidCredentials => AppError::Unauthorized(err.to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::Persistence(msg) => AppError::Persistence(msg),
            UserError::PasswordHash(msg) | UserError::Token(msg) | UserError::Internal(msg) => {
                AppError::InternalServerError(msg)
            }
            UserError::Shopping(e) => e.into(),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
