use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Address, NewUser, RoleType, User};

/// `roles` column, stored as a JSON array of upper-case names
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Roles(pub Vec<RoleType>);

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password_hash: String,
    #[sea_orm(column_type = "Json")]
    pub roles: Roles,
    pub deleted: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::address::Entity")]
    Addresses,
}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(input: NewUser) -> Self {
        let now = chrono::Utc::now().into();
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            middle_name: input.middle_name,
            last_name: input.last_name,
            email: input.email,
            mobile_number: input.mobile_number,
            password_hash: input.password_hash,
            roles: Roles(input.roles),
            deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_user(self, addresses: Vec<Address>) -> User {
        User {
            id: self.id,
            first_name: self.first_name,
            middle_name: self.middle_name,
            last_name: self.last_name,
            email: self.email,
            mobile_number: self.mobile_number,
            password_hash: self.password_hash,
            roles: self.roles.0,
            addresses,
            created_at: self.created_at.into(),
            updated_at: self.updated_at.into(),
        }
    }
}
