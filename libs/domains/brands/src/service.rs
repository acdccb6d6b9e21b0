use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{BrandError, BrandResult};
use crate::models::{Brand, CreateBrand, UpdateBrand};
use crate::repository::BrandRepository;

/// Business operations on brands
#[derive(Clone)]
pub struct BrandService<R: BrandRepository> {
    repository: Arc<R>,
}

impl<R: BrandRepository> BrandService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_brand(&self, input: CreateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_all_brands(&self) -> BrandResult<Vec<Brand>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: Uuid) -> BrandResult<Brand> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BrandError::NotFound(id))
    }

    /// Not-found is reported before a name clash
    #[instrument(skip(self, input))]
    pub async fn update_brand(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        input
            .validate()
            .map_err(|e| BrandError::Validation(e.to_string()))?;

        self.get_brand(id).await?;
        self.repository.update(id, input).await
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: Uuid) -> BrandResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(BrandError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockBrandRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn brand(name: &str) -> Brand {
        Brand {
            id: Uuid::now_v7(),
            name: name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_brand_delegates_to_repository() {
        let mut repo = MockBrandRepository::new();
        let acme = brand("Acme");
        let returned = acme.clone();
        repo.expect_create()
            .withf(|input| input.name == "Acme")
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = BrandService::new(repo);
        let created = service
            .add_brand(CreateBrand { name: "Acme".into() })
            .await
            .unwrap();
        assert_eq!(created, acme);
    }

    #[tokio::test]
    async fn test_add_brand_rejects_invalid_name_before_storage() {
        let mut repo = MockBrandRepository::new();
        repo.expect_create().never();

        let service = BrandService::new(repo);
        let result = service.add_brand(CreateBrand { name: " ".into() }).await;
        assert!(matches!(result, Err(BrandError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_brand_surfaces_duplicate() {
        let mut repo = MockBrandRepository::new();
        repo.expect_create()
            .returning(|input| Err(BrandError::Duplicate(input.name)));

        let service = BrandService::new(repo);
        let result = service.add_brand(CreateBrand { name: "Acme".into() }).await;
        assert!(matches!(result, Err(BrandError::Duplicate(name)) if name == "Acme"));
    }

    #[tokio::test]
    async fn test_get_brand_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_id().with(eq(id)).returning(|_| Ok(None));

        let service = BrandService::new(repo);
        assert!(matches!(service.get_brand(id).await, Err(BrandError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_brand_skips_write() {
        let id = Uuid::now_v7();
        let mut repo = MockBrandRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let service = BrandService::new(repo);
        let result = service
            .update_brand(id, UpdateBrand { name: "Globex".into() })
            .await;
        assert!(matches!(result, Err(BrandError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_brand_is_not_found() {
        let mut repo = MockBrandRepository::new();
        repo.expect_soft_delete().returning(|_| Ok(false));

        let service = BrandService::new(repo);
        let result = service.delete_brand(Uuid::now_v7()).await;
        assert!(matches!(result, Err(BrandError::NotFound(_))));
    }
}
