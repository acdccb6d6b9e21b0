use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewStock, Stock};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "stocks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub quantity: i32,
    pub seller_id: Uuid,
    pub product_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(input: NewStock) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            quantity: input.quantity,
            seller_id: input.seller_id,
            product_id: input.product_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Model> for Stock {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            quantity: model.quantity,
            seller_id: model.seller_id,
            product_id: model.product_id,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<NewStock> for ActiveModel {
    fn from(input: NewStock) -> Self {
        let row = Model::new(input);
        ActiveModel {
            id: Set(row.id),
            quantity: Set(row.quantity),
            seller_id: Set(row.seller_id),
            product_id: Set(row.product_id),
            deleted: Set(false),
            created_at: Set(row.created_at),
            updated_at: Set(row.updated_at),
        }
    }
}
