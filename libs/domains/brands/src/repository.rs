use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity;
use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, CreateBrand, UpdateBrand};

/// Storage for brands. Deleted brands are invisible to every read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BrandRepository: Send + Sync {
    /// Insert a brand, failing with `Duplicate` if a live brand owns the name
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand>;

    async fn find_by_id(&self, id: Uuid) -> BrandResult<Option<Brand>>;

    async fn find_all(&self) -> BrandResult<Vec<Brand>>;

    /// Replace the name of a live brand
    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand>;

    /// Mark a live brand deleted; `false` when there was none
    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool>;
}

/// In-memory implementation of BrandRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryBrandRepository {
    brands: Arc<RwLock<HashMap<Uuid, entity::Model>>>,
}

impl InMemoryBrandRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn name_taken(brands: &HashMap<Uuid, entity::Model>, name: &str, except: Option<Uuid>) -> bool {
    brands
        .values()
        .any(|b| !b.deleted && b.name == name && Some(b.id) != except)
}

#[async_trait]
impl BrandRepository for InMemoryBrandRepository {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand> {
        let mut brands = self.brands.write().await;

        if name_taken(&brands, &input.name, None) {
            return Err(BrandError::Duplicate(input.name));
        }

        let row = entity::Model::new(input.name);
        brands.insert(row.id, row.clone());

        tracing::info!(brand_id = %row.id, "Created brand");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> BrandResult<Option<Brand>> {
        let brands = self.brands.read().await;
        Ok(brands.get(&id).filter(|b| !b.deleted).cloned().map(Into::into))
    }

    async fn find_all(&self) -> BrandResult<Vec<Brand>> {
        let brands = self.brands.read().await;
        let mut result: Vec<Brand> = brands
            .values()
            .filter(|b| !b.deleted)
            .cloned()
            .map(Into::into)
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        let mut brands = self.brands.write().await;

        if !brands.get(&id).is_some_and(|b| !b.deleted) {
            return Err(BrandError::NotFound(id));
        }
        if name_taken(&brands, &input.name, Some(id)) {
            return Err(BrandError::Duplicate(input.name));
        }

        let row = brands.get_mut(&id).ok_or(BrandError::NotFound(id))?;
        row.name = input.name;
        row.updated_at = chrono::Utc::now().into();

        tracing::info!(brand_id = %id, "Updated brand");
        Ok(row.clone().into())
    }

    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool> {
        let mut brands = self.brands.write().await;

        match brands.get_mut(&id).filter(|b| !b.deleted) {
            Some(row) => {
                row.deleted = true;
                row.updated_at = chrono::Utc::now().into();
                tracing::info!(brand_id = %id, "Deleted brand");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
