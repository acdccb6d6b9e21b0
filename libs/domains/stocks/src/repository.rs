use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity;
use crate::error::{StockError, StockResult};
use crate::models::{NewStock, Stock};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    async fn create(&self, input: NewStock) -> StockResult<Stock>;

    async fn find_by_id(&self, id: Uuid) -> StockResult<Option<Stock>>;

    async fn find_all(&self) -> StockResult<Vec<Stock>>;

    async fn find_by_seller(&self, seller_id: Uuid) -> StockResult<Vec<Stock>>;

    async fn find_by_product(&self, product_id: Uuid) -> StockResult<Vec<Stock>>;

    async fn update_quantity(&self, id: Uuid, quantity: i32) -> StockResult<Stock>;

    async fn soft_delete(&self, id: Uuid) -> StockResult<bool>;
}

/// In-memory implementation of StockRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStockRepository {
    stocks: Arc<RwLock<HashMap<Uuid, entity::Model>>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn live_where(&self, keep: impl Fn(&entity::Model) -> bool) -> Vec<Stock> {
        let stocks = self.stocks.read().await;
        let mut result: Vec<Stock> = stocks
            .values()
            .filter(|s| !s.deleted && keep(s))
            .cloned()
            .map(Into::into)
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        result
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn create(&self, input: NewStock) -> StockResult<Stock> {
        let row = entity::Model::new(input);
        self.stocks.write().await.insert(row.id, row.clone());

        tracing::info!(stock_id = %row.id, product_id = %row.product_id, quantity = row.quantity, "Created stock");
        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StockResult<Option<Stock>> {
        let stocks = self.stocks.read().await;
        Ok(stocks.get(&id).filter(|s| !s.deleted).cloned().map(Into::into))
    }

    async fn find_all(&self) -> StockResult<Vec<Stock>> {
        Ok(self.live_where(|_| true).await)
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> StockResult<Vec<Stock>> {
        Ok(self.live_where(|s| s.seller_id == seller_id).await)
    }

    async fn find_by_product(&self, product_id: Uuid) -> StockResult<Vec<Stock>> {
        Ok(self.live_where(|s| s.product_id == product_id).await)
    }

    async fn update_quantity(&self, id: Uuid, quantity: i32) -> StockResult<Stock> {
        let mut stocks = self.stocks.write().await;
        let row = stocks
            .get_mut(&id)
            .filter(|s| !s.deleted)
            .ok_or(StockError::NotFound(id))?;

        row.quantity = quantity;
        row.updated_at = chrono::Utc::now().into();
        Ok(row.clone().into())
    }

    async fn soft_delete(&self, id: Uuid) -> StockResult<bool> {
        let mut stocks = self.stocks.write().await;
        match stocks.get_mut(&id).filter(|s| !s.deleted) {
            Some(row) => {
                row.deleted = true;
                row.updated_at = chrono::Utc::now().into();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_stock(product_id: Uuid, seller_id: Uuid, quantity: i32) -> NewStock {
        NewStock { product_id, seller_id, quantity }
    }

    #[tokio::test]
    async fn test_filters_by_seller_and_product() {
        let repo = InMemoryStockRepository::new();
        let (seller_a, seller_b) = (Uuid::now_v7(), Uuid::now_v7());
        let (apples, pears) = (Uuid::now_v7(), Uuid::now_v7());

        repo.create(new_stock(apples, seller_a, 3)).await.unwrap();
        repo.create(new_stock(pears, seller_a, 5)).await.unwrap();
        repo.create(new_stock(apples, seller_b, 7)).await.unwrap();

        assert_eq!(repo.find_by_seller(seller_a).await.unwrap().len(), 2);
        let apple_stock = repo.find_by_product(apples).await.unwrap();
        assert_eq!(apple_stock.iter().map(|s| s.quantity).sum::<i32>(), 10);
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_deleted_stock_is_hidden() {
        let repo = InMemoryStockRepository::new();
        let stock = repo
            .create(new_stock(Uuid::now_v7(), Uuid::now_v7(), 1))
            .await
            .unwrap();

        assert!(repo.soft_delete(stock.id).await.unwrap());
        assert_eq!(repo.find_by_id(stock.id).await.unwrap(), None);
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(matches!(
            repo.update_quantity(stock.id, 4).await,
            Err(StockError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_quantity_replaces_value() {
        let repo = InMemoryStockRepository::new();
        let stock = repo
            .create(new_stock(Uuid::now_v7(), Uuid::now_v7(), 9))
            .await
            .unwrap();

        let updated = repo.update_quantity(stock.id, 0).await.unwrap();
        assert_eq!(updated.quantity, 0);
        assert_eq!(repo.find_by_id(stock.id).await.unwrap().unwrap().quantity, 0);
    }
}
