use sea_orm::entity::prelude::*;

use crate::models::Wishlist;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "wishlists")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub user_id: Uuid,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wishlist_product::Entity")]
    Products,
}

impl Related<super::wishlist_product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(user_id: Uuid, name: String) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            name,
            user_id,
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_wishlist(self, product_ids: Vec<Uuid>) -> Wishlist {
        Wishlist {
            id: self.id,
            name: self.name,
            user_id: self.user_id,
            product_ids,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
