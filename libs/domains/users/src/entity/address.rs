use sea_orm::entity::prelude::*;

use crate::models::{Address, CreateAddress};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub door_number: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
    pub address_type: String,
    pub landmark: Option<String>,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(user_id: Uuid, input: CreateAddress) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            user_id,
            door_number: input.door_number,
            street: input.street,
            city: input.city,
            state: input.state,
            pin_code: input.pin_code,
            address_type: input.address_type,
            landmark: input.landmark,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<Model> for Address {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            door_number: model.door_number,
            street: model.street,
            city: model.city,
            state: model.state,
            pin_code: model.pin_code,
            address_type: model.address_type,
            landmark: model.landmark,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
