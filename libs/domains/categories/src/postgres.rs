use async_trait::async_trait;
use database::postgres::violates_constraint;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::{CategoryError, CategoryResult},
    models::{Category, CreateCategory},
    repository::CategoryRepository,
};

#[derive(Clone)]
pub struct PgCategoryRepository {
    db: DatabaseConnection,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let name = input.name.clone();
        let model = entity::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if violates_constraint(&e, "uq_categories_name") {
                    CategoryError::Duplicate(name)
                } else {
                    e.into()
                }
            })?;

        tracing::info!(category_id = %model.id, parent_id = ?model.parent_id, "Created category");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find_by_id(id)
            .filter(entity::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> CategoryResult<Option<Category>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .filter(entity::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn find_all(&self) -> CategoryResult<Vec<Category>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Deleted.eq(false))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}
