use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity;
use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a category, failing with `Duplicate` on a live name clash
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    async fn find_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>>;

    /// Live category with exactly this name, top-level or not
    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>>;

    async fn find_all(&self) -> CategoryResult<Vec<Category>>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<Uuid, entity::Model>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let mut categories = self.categories.write().await;

        if categories.values().any(|c| !c.deleted && c.name == input.name) {
            return Err(CategoryError::Duplicate(input.name));
        }

        let row = entity::Model::new(input);
        categories.insert(row.id, row.clone());

        tracing::info!(category_id = %row.id, parent_id = ?row.parent_id, "Created category");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .get(&id)
            .filter(|c| !c.deleted)
            .cloned()
            .map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories
            .values()
            .find(|c| !c.deleted && c.name == name)
            .cloned()
            .map(Into::into))
    }

    async fn find_all(&self) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| !c.deleted)
            .cloned()
            .map(Into::into)
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }
}
