use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StockError {
    #[error("Stock with id {0} not found")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StockResult<T> = Result<T, StockError>;

impl From<DbErr> for StockError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<StockError> for AppError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::NotFound(_) => AppError::NotFound(err.to_string()),
            StockError::Validation(msg) => AppError::BadRequest(msg),
            StockError::Persistence(msg) => AppError::Persistence(msg),
            StockError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StockError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
