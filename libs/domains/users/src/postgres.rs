use async_trait::async_trait;
use database::postgres::violates_constraint;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::{address, user};
use crate::error::{UserError, UserResult};
use crate::models::{Address, CreateAddress, NewUser, UpdateUser, User};
use crate::repository::UserRepository;

const UNIQUE_EMAIL: &str = "uq_users_email";
const UNIQUE_MOBILE: &str = "uq_users_mobile_number";

#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_live(&self, id: Uuid) -> UserResult<Option<user::Model>> {
        Ok(user::Entity::find_by_id(id)
            .filter(user::Column::Deleted.eq(false))
            .one(&self.db)
            .await?)
    }

    async fn assemble(&self, row: user::Model) -> UserResult<User> {
        let addresses = row
            .find_related(address::Entity)
            .filter(address::Column::Deleted.eq(false))
            .order_by_asc(address::Column::CreatedAt)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

        Ok(row.into_user(addresses))
    }
}

fn write_error(err: DbErr, email: &str, mobile_number: &str) -> UserError {
    if violates_constraint(&err, UNIQUE_EMAIL) {
        UserError::DuplicateEmail(email.to_string())
    } else if violates_constraint(&err, UNIQUE_MOBILE) {
        UserError::DuplicateMobile(mobile_number.to_string())
    } else {
        err.into()
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser, addresses: Vec<CreateAddress>) -> UserResult<User> {
        let (email, mobile_number) = (input.email.clone(), input.mobile_number.clone());
        let txn = self.db.begin().await?;

        let row = user::Model::new(input)
            .into_active_model()
            .reset_all()
            .insert(&txn)
            .await
            .map_err(|e| write_error(e, &email, &mobile_number))?;

        let mut saved = Vec::with_capacity(addresses.len());
        for input in addresses {
            let address = address::Model::new(row.id, input)
                .into_active_model()
                .reset_all()
                .insert(&txn)
                .await?;
            saved.push(Address::from(address));
        }

        txn.commit().await?;

        tracing::info!(user_id = %row.id, addresses = saved.len(), "Created user");
        Ok(row.into_user(saved))
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        match self.find_live(id).await? {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let row = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let rows = user::Entity::find()
            .filter(user::Column::Deleted.eq(false))
            .order_by_asc(user::Column::CreatedAt)
            .find_with_related(address::Entity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(row, addresses)| {
                let addresses = addresses
                    .into_iter()
                    .filter(|a| !a.deleted)
                    .map(Into::into)
                    .collect();
                row.into_user(addresses)
            })
            .collect())
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let row = self.find_live(id).await?.ok_or(UserError::NotFound(id))?;
        let (email, mobile_number) = (input.email.clone(), input.mobile_number.clone());

        let mut active = row.into_active_model();
        active.first_name = Set(input.first_name);
        active.middle_name = Set(input.middle_name);
        active.last_name = Set(input.last_name);
        active.email = Set(input.email);
        active.mobile_number = Set(input.mobile_number);
        active.updated_at = Set(chrono::Utc::now().into());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| write_error(e, &email, &mobile_number))?;

        tracing::info!(user_id = %id, "Updated user");
        self.assemble(updated).await
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let Some(row) = self.find_live(id).await? else {
            return Ok(false);
        };

        let mut active = row.into_active_model();
        active.deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        tracing::info!(user_id = %id, "Deleted user");
        Ok(true)
    }

    async fn add_address(&self, user_id: Uuid, input: CreateAddress) -> UserResult<Address> {
        if self.find_live(user_id).await?.is_none() {
            return Err(UserError::NotFound(user_id));
        }

        let row = address::Model::new(user_id, input)
            .into_active_model()
            .reset_all()
            .insert(&self.db)
            .await?;

        tracing::info!(address_id = %row.id, %user_id, "Added address");
        Ok(row.into())
    }

    async fn find_address(&self, id: Uuid) -> UserResult<Option<Address>> {
        Ok(address::Entity::find_by_id(id)
            .filter(address::Column::Deleted.eq(false))
            .one(&self.db)
            .await?
            .map(Into::into))
    }

    async fn find_addresses(&self, user_id: Uuid) -> UserResult<Vec<Address>> {
        let rows = address::Entity::find()
            .filter(address::Column::UserId.eq(user_id))
            .filter(address::Column::Deleted.eq(false))
            .order_by_asc(address::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn soft_delete_address(&self, user_id: Uuid, id: Uuid) -> UserResult<bool> {
        let row = address::Entity::find_by_id(id)
            .filter(address::Column::UserId.eq(user_id))
            .filter(address::Column::Deleted.eq(false))
            .one(&self.db)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        let mut active = row.into_active_model();
        active.deleted = Set(true);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await?;

        tracing::info!(address_id = %id, %user_id, "Deleted address");
        Ok(true)
    }
}
