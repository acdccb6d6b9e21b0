use sea_orm::entity::prelude::*;

use crate::models::{Cart, CartItem};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_product::Entity")]
    Products,
}

impl Related<super::cart_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(user_id: Uuid) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            user_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_cart(self, items: Vec<CartItem>) -> Cart {
        Cart {
            id: self.id,
            user_id: self.user_id,
            items,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
