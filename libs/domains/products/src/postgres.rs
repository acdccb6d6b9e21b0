use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Select,
};
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{NewProduct, Product},
    repository::ProductRepository,
};

#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn live() -> Select<entity::Entity> {
        entity::Entity::find()
            .filter(entity::Column::Deleted.eq(false))
            .order_by_asc(entity::Column::CreatedAt)
    }

    async fn all(&self, query: Select<entity::Entity>) -> ProductResult<Vec<Product>> {
        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_live(&self, id: Uuid) -> ProductResult<Option<entity::Model>> {
        Ok(Self::live()
            .filter(entity::Column::Id.eq(id))
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: NewProduct) -> ProductResult<Product> {
        let model = entity::ActiveModel::from(input).insert(&self.db).await?;

        tracing::info!(product_id = %model.id, name = %model.name, "Created product");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.find_live(id).await?.map(Into::into))
    }

    async fn find_by_ids(&self, ids: Vec<Uuid>) -> ProductResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.all(Self::live().filter(entity::Column::Id.is_in(ids)))
            .await
    }

    async fn find_by_name_and_description(
        &self,
        name: &str,
        description: &str,
    ) -> ProductResult<Option<Product>> {
        let model = Self::live()
            .filter(entity::Column::Name.eq(name))
            .filter(entity::Column::Description.eq(description))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> ProductResult<Vec<Product>> {
        self.all(Self::live()).await
    }

    async fn find_by_brand(&self, brand_id: Uuid) -> ProductResult<Vec<Product>> {
        self.all(Self::live().filter(entity::Column::BrandId.eq(brand_id)))
            .await
    }

    async fn find_by_category(&self, category_id: Uuid) -> ProductResult<Vec<Product>> {
        self.all(Self::live().filter(entity::Column::CategoryId.eq(category_id)))
            .await
    }

    async fn find_by_sub_category(&self, sub_category_id: Uuid) -> ProductResult<Vec<Product>> {
        self.all(Self::live().filter(entity::Column::SubCategoryId.eq(sub_category_id)))
            .await
    }

    async fn update(&self, id: Uuid, input: NewProduct) -> ProductResult<Product> {
        let mut model = self.find_live(id).await?.ok_or(ProductError::NotFound(id))?;
        model.replace(input);

        // Mark every replaced column dirty
        let mut active = model.clone().into_active_model();
        active.name = Set(model.name);
        active.description = Set(model.description);
        active.price = Set(model.price);
        active.brand_id = Set(model.brand_id);
        active.category_id = Set(model.category_id);
        active.sub_category_id = Set(model.sub_category_id);
        active.updated_at = Set(model.updated_at);

        let updated = active.update(&self.db).await?;
        tracing::info!(product_id = %id, "Updated product");
        Ok(updated.into())
    }

    async fn soft_delete(&self, id: Uuid) -> ProductResult<bool> {
        let Some(model) = self.find_live(id).await? else {
            return Ok(false);
        };

        let mut active = model.into_active_model();
        active.deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        tracing::info!(product_id = %id, "Deleted product");
        Ok(true)
    }
}
