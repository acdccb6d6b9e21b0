use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Stock {
    pub id: Uuid,
    pub quantity: i32,
    pub seller_id: Uuid,
    pub product_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Stock recorded when a seller lists a product
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewStock {
    pub product_id: Uuid,
    pub seller_id: Uuid,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Full replacement of the held quantity
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateStock {
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: i32,
}
