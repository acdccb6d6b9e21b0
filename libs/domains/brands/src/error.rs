use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum BrandError {
    #[error("Brand with id {0} not found")]
    NotFound(Uuid),

    #[error("Brand with name {0} already exists")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Brand could not be saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type BrandResult<T> = Result<T, BrandError>;

impl From<DbErr> for BrandError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<BrandError> for AppError {
    fn from(err: BrandError) -> Self {
        match err {
            BrandError::NotFound(_) => AppError::NotFound(err.to_string()),
            BrandError::Duplicate(_) => AppError::Conflict(err.to_string()),
            BrandError::Validation(msg) => AppError::BadRequest(msg),
            BrandError::Persistence(msg) => AppError::Persistence(msg),
            BrandError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for BrandError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
