use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{StockError, StockResult},
    models::{NewStock, Stock},
    repository::StockRepository,
};

#[derive(Clone)]
pub struct PgStockRepository {
    db: DatabaseConnection,
}

impl PgStockRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(entity::Column::Deleted.eq(false))
            .order_by_asc(entity::Column::CreatedAt)
    }

    async fn all(&self, query: Select<entity::Entity>) -> StockResult<Vec<Stock>> {
        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_live(&self, id: Uuid) -> StockResult<Option<entity::Model>> {
        Ok(Self::live()
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn create(&self, input: NewStock) -> StockResult<Stock> {
        let model = entity::ActiveModel::from(input).insert(&self.db).await?;

        tracing::info!(stock_id = %model.id, product_id = %model.product_id, quantity = model.quantity, "Created stock");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> StockResult<Option<Stock>> {
        Ok(self.find_live(id).await?.map(Into::into))
    }

    async fn find_all(&self) -> StockResult<Vec<Stock>> {
        self.all(Self::live()).await
    }

    async fn find_by_seller(&self, seller_id: Uuid) -> StockResult<Vec<Stock>> {
        self.all(Self::live().filter(entity::Column::SellerId.eq(seller_id)))
            .await
    }

    async fn find_by_product(&self, product_id: Uuid) -> StockResult<Vec<Stock>> {
        self.all(Self::live().filter(entity::Column::ProductId.eq(product_id)))
            .await
    }

    async fn update_quantity(&self, id: Uuid, quantity: i32) -> StockResult<Stock> {
        let model = self.find_live(id).await?.ok_or(StockError::NotFound(id))?;

        let mut active = model.into_active_model();
        active.quantity = Set(quantity);
        active.updated_at = Set(chrono::Utc::now().into());

        Ok(active.update(&self.db).await?.into())
    }

    async fn soft_delete(&self, id: Uuid) -> StockResult<bool> {
        let Some(model) = self.find_live(id).await? else {
            return Ok(false);
        };

        let mut active = model.into_active_model();
        active.deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;
        Ok(true)
    }
}
