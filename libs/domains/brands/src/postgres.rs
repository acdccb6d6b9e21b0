use async_trait::async_trait;
use database::postgres::violates_constraint;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{BrandError, BrandResult},
    models::{Brand, CreateBrand, UpdateBrand},
    repository::BrandRepository,
};

const UNIQUE_NAME: &str = "uq_brands_name";

#[derive(Clone)]
pub struct PgBrandRepository {
    db: DatabaseConnection,
}

impl PgBrandRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: Uuid) -> BrandResult<Option<entity::Model>> {
        Ok(entity::Entity::find_by_id(id)
            .filter(entity::Column::Deleted.eq(false))
            .one(&self.db)
            .await?)
    }
}

fn write_error(err: DbErr, name: &str) -> BrandError {
    if violates_constraint(&err, UNIQUE_NAME) {
        BrandError::Duplicate(name.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, input: CreateBrand) -> BrandResult<Brand> {
        let name = input.name.clone();
        let model = entity::ActiveModel::from(input)
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, &name))?;

        tracing::info!(brand_id = %model.id, "Created brand");
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> BrandResult<Option<Brand>> {
        Ok(self.find_live(id).await?.map(Into::into))
    }

    async fn find_all(&self) -> BrandResult<Vec<Brand>> {
        let models = entity::Entity::find()
            .filter(entity::Column::Deleted.eq(false))
            .order_by_asc(entity::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: Uuid, input: UpdateBrand) -> BrandResult<Brand> {
        let model = self.find_live(id).await?.ok_or(BrandError::NotFound(id))?;

        let mut active = model.into_active_model();
        active.name = Set(input.name.clone());
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, &input.name))?;

        tracing::info!(brand_id = %id, "Updated brand");
        Ok(updated.into())
    }

    async fn soft_delete(&self, id: Uuid) -> BrandResult<bool> {
        let Some(model) = self.find_live(id).await? else {
            return Ok(false);
        };

        let mut active = model.into_active_model();
        active.deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        tracing::info!(brand_id = %id, "Deleted brand");
        Ok(true)
    }
}
