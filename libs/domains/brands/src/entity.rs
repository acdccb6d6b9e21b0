use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Brand, CreateBrand};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// A live row that has not been stored yet
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            name,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Model> for Brand {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<CreateBrand> for ActiveModel {
    fn from(input: CreateBrand) -> Self {
        let row = Model::new(input.name);
        ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            deleted: Set(row.deleted),
            created_at: Set(row.created_at),
            updated_at: Set(row.updated_at),
        }
    }
}
