use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Wishlist {
    pub id: Uuid,
    /// `<first_name>Wishlist` for wishlists created at signup
    pub name: String,
    pub user_id: Uuid,
    /// In the order they were added
    pub product_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub id: Uuid,
    pub user_id: Uuid,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Upper bound for one product's quantity in a cart, summed over every add
pub const MAX_CART_QUANTITY: i32 = 10_000;

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct AddToCart {
    #[validate(range(
        min = 1,
        max = MAX_CART_QUANTITY,
        message = "Quantity must be between 1 and 10000"
    ))]
    #[serde(default = "one")]
    pub quantity: i32,
}

fn one() -> i32 {
    1
}
