use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_products::ProductError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ShoppingError {
    #[error("Wishlist with id {0} not found")]
    WishlistNotFound(Uuid),

    #[error("No wishlist found for user {0}")]
    NoWishlist(Uuid),

    #[error("No cart found for user {0}")]
    NoCart(Uuid),

    #[error("Product {0} is not in the wishlist")]
    NotInWishlist(Uuid),

    #[error("Product {0} is not in the cart")]
    NotInCart(Uuid),

    #[error("User {0} already has a {1}")]
    Duplicate(Uuid, &'static str),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Could not be saved: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Product(#[from] ProductError),
}

pub type ShoppingResult<T> = Result<T, ShoppingError>;

impl ShoppingError {
    pub(crate) fn quantity_limit(product_id: Uuid) -> Self {
        Self::Validation(format!(
            "Cart quantity for product {} cannot exceed {}",
            product_id,
            crate::models::MAX_CART_QUANTITY
        ))
    }
}

impl From<DbErr> for ShoppingError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotInserted | DbErr::RecordNotUpdated => Self::Persistence(err.to_string()),
            _ => Self::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<ShoppingError> for AppError {
    fn from(err: ShoppingError) -> Self {
        match err {
            ShoppingError::WishlistNotFound(_)
            | ShoppingError::NoWishlist(_)
            | ShoppingError::NoCart(_)
            | ShoppingError::NotInWishlist(_)
            | ShoppingError::NotInCart(_) => AppError::NotFound(err.to_string()),
            ShoppingError::Duplicate(..) => AppError::Conflict(err.to_string()),
            ShoppingError::Validation(msg) => AppError::BadRequest(msg),
            ShoppingError::Persistence(msg) => AppError::Persistence(msg),
            ShoppingError::Internal(msg) => AppError::InternalServerError(msg),
            ShoppingError::Product(e) => e.into(),
        }
    }
}

impl IntoResponse for ShoppingError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
