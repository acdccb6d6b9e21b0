use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Letters, digits, spaces and `& ' . -`
static BRAND_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9&'. -]+$").expect("brand name pattern compiles"));

fn validate_brand_name(name: &str) -> Result<(), validator::ValidationError> {
    if name.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Brand name must not be blank".into()));
    }
    if !BRAND_NAME.is_match(name) {
        return Err(validator::ValidationError::new("invalid_brand_name")
            .with_message("Brand name may contain letters, digits, spaces and & ' . -".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateBrand {
    #[validate(
        length(min = 1, max = 100, message = "Brand name must be between 1 and 100 characters"),
        custom(function = "validate_brand_name")
    )]
    pub name: String,
}

/// Full replacement of a brand's fields
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateBrand {
    #[validate(
        length(min = 1, max = 100, message = "Brand name must be between 1 and 100 characters"),
        custom(function = "validate_brand_name")
    )]
    pub name: String,
}
