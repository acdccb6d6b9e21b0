use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory};
use crate::repository::CategoryRepository;

#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// A parent must exist and must itself be top-level
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        if let Some(parent_id) = input.parent_id {
            let parent = self.get_category(parent_id).await?;
            if parent.is_sub_category() {
                return Err(CategoryError::Validation(format!(
                    "Category {} is a sub-category and cannot have children",
                    parent.name
                )));
            }
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> CategoryResult<Category> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_category_by_name(&self, name: &str) -> CategoryResult<Category> {
        self.repository
            .find_by_name(name)
            .await?
            .filter(|c| !c.is_sub_category())
            .ok_or_else(|| CategoryError::NameNotFound(name.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn get_sub_category_by_name(&self, name: &str) -> CategoryResult<Category> {
        self.repository
            .find_by_name(name)
            .await?
            .filter(Category::is_sub_category)
            .ok_or_else(|| CategoryError::SubCategoryNotFound(name.to_string()))
    }
}
