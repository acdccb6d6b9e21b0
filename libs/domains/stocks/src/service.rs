use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{StockError, StockResult};
use crate::models::{NewStock, Stock, UpdateStock};
use crate::repository::StockRepository;

#[derive(Clone)]
pub struct StockService<R: StockRepository> {
    repository: Arc<R>,
}

impl<R: StockRepository> StockService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Any storage failure is reported as a persistence error; callers do
    /// not roll back work done before this call.
    #[instrument(skip(self))]
    pub async fn add_stock(&self, product_id: Uuid, seller_id: Uuid, quantity: i32) -> StockResult<Stock> {
        let input = NewStock { product_id, seller_id, quantity };
        input
            .validate()
            .map_err(|e| StockError::Validation(e.to_string()))?;

        self.repository.create(input).await.map_err(|e| {
            tracing::error!(error = %e, %product_id, "Stock write failed");
            StockError::Persistence("stock creation failed".to_string())
        })
    }

    #[instrument(skip(self))]
    pub async fn get_stocks(&self) -> StockResult<Vec<Stock>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_stock(&self, id: Uuid) -> StockResult<Stock> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(StockError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_stocks_by_seller(&self, seller_id: Uuid) -> StockResult<Vec<Stock>> {
        self.repository.find_by_seller(seller_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_stocks_by_product(&self, product_id: Uuid) -> StockResult<Vec<Stock>> {
        self.repository.find_by_product(product_id).await
    }

    #[instrument(skip(self, input))]
    pub async fn update_stock(&self, id: Uuid, input: UpdateStock) -> StockResult<Stock> {
        input
            .validate()
            .map_err(|e| StockError::Validation(e.to_string()))?;

        self.get_stock(id).await?;
        self.repository.update_quantity(id, input.quantity).await
    }

    #[instrument(skip(self))]
    pub async fn delete_stock(&self, id: Uuid) -> StockResult<()> {
        if !self.repository.soft_delete(id).await? {
            return Err(StockError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockStockRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn stock(quantity: i32) -> Stock {
        Stock {
            id: Uuid::now_v7(),
            quantity,
            seller_id: Uuid::now_v7(),
            product_id: Uuid::now_v7(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_stock_passes_quantity_through() {
        let mut repo = MockStockRepository::new();
        repo.expect_create()
            .withf(|input| input.quantity == 12)
            .times(1)
            .returning(|input| {
                let mut s = stock(input.quantity);
                s.product_id = input.product_id;
                Ok(s)
            });

        let service = StockService::new(repo);
        let product_id = Uuid::now_v7();
        let created = service.add_stock(product_id, Uuid::now_v7(), 12).await.unwrap();
        assert_eq!(created.quantity, 12);
        assert_eq!(created.product_id, product_id);
    }

    #[tokio::test]
    async fn test_add_stock_failure_is_persistence_error() {
        let mut repo = MockStockRepository::new();
        repo.expect_create()
            .returning(|_| Err(StockError::Internal("connection reset".into())));

        let service = StockService::new(repo);
        let result = service.add_stock(Uuid::now_v7(), Uuid::now_v7(), 1).await;
        match result {
            Err(StockError::Persistence(msg)) => assert_eq!(msg, "stock creation failed"),
            other => panic!("expected persistence error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_stock_requires_positive_quantity() {
        let mut repo = MockStockRepository::new();
        repo.expect_create().never();

        let service = StockService::new(repo);
        let result = service.add_stock(Uuid::now_v7(), Uuid::now_v7(), 0).await;
        assert!(matches!(result, Err(StockError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_stock_allows_zero() {
        let existing = stock(5);
        let id = existing.id;
        let mut repo = MockStockRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update_quantity()
            .with(eq(id), eq(0))
            .returning(|_, q| Ok(stock(q)));

        let service = StockService::new(repo);
        let updated = service.update_stock(id, UpdateStock { quantity: 0 }).await.unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[tokio::test]
    async fn test_update_stock_rejects_negative() {
        let mut repo = MockStockRepository::new();
        repo.expect_update_quantity().never();

        let service = StockService::new(repo);
        let result = service
            .update_stock(Uuid::now_v7(), UpdateStock { quantity: -1 })
            .await;
        assert!(matches!(result, Err(StockError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_stock_is_not_found() {
        let mut repo = MockStockRepository::new();
        repo.expect_soft_delete().returning(|_| Ok(false));

        let service = StockService::new(repo);
        assert!(matches!(
            service.delete_stock(Uuid::now_v7()).await,
            Err(StockError::NotFound(_))
        ));
    }
}
