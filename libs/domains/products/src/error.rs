use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_brands::BrandError;
use domain_categories::CategoryError;
use domain_stocks::StockError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product with id {0} not found")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product could not be saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Brand(#[from] BrandError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Stock(#[from] StockError),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::NotFound(err.to_string()),
            ProductError::InvalidInput(msg) => AppError::BadRequest(msg),
            ProductError::Persistence(msg) => AppError::Persistence(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
            ProductError::Brand(e) => e.into(),
            ProductError::Category(e) => e.into(),
            ProductError::Stock(e) => e.into(),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
