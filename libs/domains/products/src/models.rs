use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

static PRODUCT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9&'. -]+$").expect("product name pattern compiles"));

fn validate_product_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Product name is compulsory".into()));
    }
    if !PRODUCT_NAME.is_match(name) {
        return Err(validator::ValidationError::new("invalid_product_name")
            .with_message("Product name may contain letters, digits, spaces and & ' . -".into()));
    }
    Ok(())
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Description is compulsory".into()));
    }
    Ok(())
}

/// Stored product. Dates and quantity from the create request are not kept
/// here; quantity lives on the seller's stock row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 100), custom(function = "validate_product_name"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 1.0, message = "Price must be at least 1"))]
    pub price: f64,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    /// `yyyy-MM-dd`, must be before `date_of_expire`
    pub date_of_manufacture: NaiveDate,
    pub date_of_expire: NaiveDate,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

/// Full replacement of a product's stored fields
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 100), custom(function = "validate_product_name"))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub description: String,
    #[validate(range(min = 1.0, message = "Price must be at least 1"))]
    pub price: f64,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

/// Persisted columns of a product
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

impl From<&CreateProduct> for NewProduct {
    fn from(input: &CreateProduct) -> Self {
        Self {
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            brand_id: input.brand_id,
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
        }
    }
}

impl From<UpdateProduct> for NewProduct {
    fn from(input: UpdateProduct) -> Self {
        Self {
            name: input.name,
            description: input.description,
            price: input.price,
            brand_id: input.brand_id,
            category_id: input.category_id,
            sub_category_id: input.sub_category_id,
        }
    }
}

/// Brand, category and sub-category ids a product points at
#[derive(Debug, Clone, Copy)]
pub(crate) struct Relations {
    pub brand_id: Uuid,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
}

impl From<&NewProduct> for Relations {
    fn from(p: &NewProduct) -> Self {
        Self {
            brand_id: p.brand_id,
            category_id: p.category_id,
            sub_category_id: p.sub_category_id,
        }
    }
}
