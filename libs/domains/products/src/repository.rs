use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::{NewProduct, Product};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: NewProduct) -> ProductResult<Product>;

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Live products among `ids`, in creation order
    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>>;

    /// Live product with the same name and description, the dedup key on create
    async fn find_by_name_and_description(
        &self,
        name: &str,
        description: &str,
    ) -> ProductResult<Option<Product>>;

    async fn find_all(&self) -> ProductResult<Vec<Product>>;

    async fn find_by_brand(&self, brand_id: Uuid) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category_id: Uuid) -> ProductResult<Vec<Product>>;

    async fn find_by_sub_category(&self, sub_category_id: Uuid) -> ProductResult<Vec<Product>>;

    async fn update(&self, id: Uuid, input: NewProduct) -> ProductResult<Product>;

    async fn soft_delete(&self, id: Uuid) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, entity::Model>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn live_where(&self, keep: impl Fn(&entity::Model) -> bool) -> Vec<Product> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products
            .values()
            .filter(|p| !p.deleted && keep(p))
            .cloned()
            .map(Into::into)
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        result
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let row = entity::Model::new(input);
        self.products.write().await.insert(row.id, row.clone());

        tracing::info!(product_id = %row.id, name = %row.name, "Created product");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).filter(|p| !p.deleted).cloned().map(Into::into))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>> {
        Ok(self.live_where(|p| ids.contains(&p.id)).await)
    }

    async fn find_by_name_and_description(
        &self,
        name: &str,
        description: &str,
    ) -> ProductResult<Option<Product>> {
        Ok(self
            .live_where(|p| p.name == name && p.description == description)
            .await
            .into_iter()
            .next())
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        Ok(self.live_where(|_| true).await)
    }

    async fn find_by_brand(&self, brand_id: Uuid) -> ProductResult<Vec<Product>> {
        Ok(self.live_where(|p| p.brand_id == brand_id).await)
    }

    async fn find_by_category(&self, category_id: Uuid) -> ProductResult<Vec<Product>> {
        Ok(self.live_where(|p| p.category_id == category_id).await)
    }

    async fn find_by_sub_category(&self, sub_category_id: Uuid) -> ProductResult<Vec<Product>> {
        Ok(self.live_where(|p| p.sub_category_id == sub_category_id).await)
    }

    async fn update(&self, id: Uuid, input: NewProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let row = products
            .get_mut(&id)
            .filter(|p| !p.deleted)
            .ok_or(ProductError::NotFound(id))?;

        row.replace(input);
        tracing::info!(product_id = %id, "Updated product");
        Ok(row.clone().into())
    }

    async fn soft_delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&id).filter(|p| !p.deleted) {
            Some(row) => {
                row.deleted = true;
                row.updated_at = chrono::Utc::now().into();
                tracing::info!(product_id = %id, "Deleted product");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
