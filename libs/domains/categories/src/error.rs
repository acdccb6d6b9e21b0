use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Category with id {0} not found")]
    NotFound(Uuid),

    #[error("Category with name {0} not found")]
    NameNotFound(String),

    #[error("Sub-category with name {0} not found")]
    SubCategoryNotFound(String),

    #[error("Category with name {0} already exists")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Category could not be saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CategoryResult<T> = Result<T, CategoryError>;

impl From<DbErr> for CategoryError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<CategoryError> for AppError {
    fn from(err: CategoryError) -> Self {
        match err {
            CategoryError::NotFound(_)
            | CategoryError::NameNotFound(_)
            | CategoryError::SubCategoryNotFound(_) => AppError::NotFound(err.to_string()),
            CategoryError::Duplicate(_) => AppError::Conflict(err.to_string()),
            CategoryError::Validation(msg) => AppError::BadRequest(msg),
            CategoryError::Persistence(msg) => AppError::Persistence(msg),
            CategoryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CategoryError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
