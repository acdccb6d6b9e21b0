use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Category, CreateCategory};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(input: CreateCategory) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            parent_id: input.parent_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Model> for Category {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<CreateCategory> for ActiveModel {
    fn from(input: CreateCategory) -> Self {
        let row = Model::new(input);
        ActiveModel {
            id: Set(row.id),
            name: Set(row.name),
            parent_id: Set(row.parent_id),
            deleted: Set(false),
            created_at: Set(row.created_at),
            updated_at: Set(row.updated_at),
        }
    }
}
