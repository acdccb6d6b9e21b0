use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        return Err(validator::ValidationError::new("blank")
            .with_message("Category name must not be blank".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    /// `None` for a top-level category
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn is_sub_category(&self) -> bool {
        self.parent_id.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct CreateCategory {
    #[validate(
        length(min = 1, max = 100, message = "Category name must be between 1 and 100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    /// Top-level category this one belongs under
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}
