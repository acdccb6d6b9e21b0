use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::{address, user};
use crate::error::{UserError, UserResult};
use crate::models::{Address, CreateAddress, NewUser, UpdateUser, User};

/// Storage for users and the addresses they own.
///
/// Deleted users and deleted addresses are invisible to every read.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user with its initial addresses.
    ///
    /// `DuplicateEmail` / `DuplicateMobile` when a live user owns either value.
    async fn create(&self, input: NewUser, addresses: Vec<CreateAddress>) -> UserResult<User>;

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>>;

    async fn find_all(&self) -> UserResult<Vec<User>>;

    /// Replace the profile fields; roles, password and addresses are untouched
    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User>;

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool>;

    async fn add_address(&self, user_id: Uuid, input: CreateAddress) -> UserResult<Address>;

    async fn find_address(&self, id: Uuid) -> UserResult<Option<Address>>;

    async fn find_addresses(&self, user_id: Uuid) -> UserResult<Vec<Address>>;

    /// `false` unless `id` is a live address of `user_id`
    async fn soft_delete_address(&self, user_id: Uuid, id: Uuid) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, user::Model>,
    addresses: HashMap<Uuid, address::Model>,
}

impl Tables {
    fn live_user(&self, id: Uuid) -> Option<&user::Model> {
        self.users.get(&id).filter(|u| !u.deleted)
    }

    fn addresses_of(&self, user_id: Uuid) -> Vec<Address> {
        let mut result: Vec<Address> = self
            .addresses
            .values()
            .filter(|a| !a.deleted && a.user_id == user_id)
            .cloned()
            .map(Into::into)
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        result
    }

    fn assemble(&self, row: &user::Model) -> User {
        row.clone().into_user(self.addresses_of(row.id))
    }

    /// Email is checked before mobile number
    fn clash(&self, email: &str, mobile_number: &str, except: Option<Uuid>) -> Option<UserError> {
        let others = || {
            self.users
                .values()
                .filter(move |u| !u.deleted && Some(u.id) != except)
        };

        if others().any(|u| u.email == email) {
            return Some(UserError::DuplicateEmail(email.to_string()));
        }
        if others().any(|u| u.mobile_number == mobile_number) {
            return Some(UserError::DuplicateMobile(mobile_number.to_string()));
        }
        None
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: NewUser, addresses: Vec<CreateAddress>) -> UserResult<User> {
        let mut tables = self.tables.write().await;

        if let Some(err) = tables.clash(&input.email, &input.mobile_number, None) {
            return Err(err);
        }

        let row = user::Model::new(input);
        for address in addresses {
            let address = address::Model::new(row.id, address);
            tables.addresses.insert(address.id, address);
        }
        tables.users.insert(row.id, row.clone());

        tracing::info!(user_id = %row.id, "Created user");
        Ok(tables.assemble(&row))
    }

    async fn find_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.live_user(id).map(|row| tables.assemble(row)))
    }

    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| !u.deleted && u.email == email)
            .map(|row| tables.assemble(row)))
    }

    async fn find_all(&self) -> UserResult<Vec<User>> {
        let tables = self.tables.read().await;
        let mut result: Vec<User> = tables
            .users
            .values()
            .filter(|u| !u.deleted)
            .map(|row| tables.assemble(row))
            .collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn update(&self, id: Uuid, input: UpdateUser) -> UserResult<User> {
        let mut tables = self.tables.write().await;

        if tables.live_user(id).is_none() {
            return Err(UserError::NotFound(id));
        }
        if let Some(err) = tables.clash(&input.email, &input.mobile_number, Some(id)) {
            return Err(err);
        }

        let row = tables.users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        row.first_name = input.first_name;
        row.middle_name = input.middle_name;
        row.last_name = input.last_name;
        row.email = input.email;
        row.mobile_number = input.mobile_number;
        row.updated_at = chrono::Utc::now().into();
        let row = row.clone();

        tracing::info!(user_id = %id, "Updated user");
        Ok(tables.assemble(&row))
    }

    async fn soft_delete(&self, id: Uuid) -> UserResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&id).filter(|u| !u.deleted) {
            Some(row) => {
                row.deleted = true;
                row.updated_at = chrono::Utc::now().into();
                tracing::info!(user_id = %id, "Deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn add_address(&self, user_id: Uuid, input: CreateAddress) -> UserResult<Address> {
        let mut tables = self.tables.write().await;
        if tables.live_user(user_id).is_none() {
            return Err(UserError::NotFound(user_id));
        }

        let row = address::Model::new(user_id, input);
        tables.addresses.insert(row.id, row.clone());

        tracing::info!(address_id = %row.id, %user_id, "Added address");
        Ok(row.into())
    }

    async fn find_address(&self, id: Uuid) -> UserResult<Option<Address>> {
        let tables = self.tables.read().await;
        Ok(tables
            .addresses
            .get(&id)
            .filter(|a| !a.deleted)
            .cloned()
            .map(Into::into))
    }

    async fn find_addresses(&self, user_id: Uuid) -> UserResult<Vec<Address>> {
        Ok(self.tables.read().await.addresses_of(user_id))
    }

    async fn soft_delete_address(&self, user_id: Uuid, id: Uuid) -> UserResult<bool> {
        let mut tables = self.tables.write().await;
        match tables
            .addresses
            .get_mut(&id)
            .filter(|a| !a.deleted && a.user_id == user_id)
        {
            Some(row) => {
                row.deleted = true;
                row.updated_at = chrono::Utc::now().into();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RoleType;

    fn new_user(email: &str, mobile: &str) -> NewUser {
        NewUser {
            first_name: "Asha".into(),
            middle_name: None,
            last_name: "Rao".into(),
            email: email.into(),
            mobile_number: mobile.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            roles: vec![RoleType::Customer],
        }
    }

    fn home() -> CreateAddress {
        CreateAddress {
            door_number: "12B".into(),
            street: "MG Road".into(),
            city: "Chennai".into(),
            state: "Tamil Nadu".into(),
            pin_code: "600001".into(),
            address_type: "HOME".into(),
            landmark: None,
        }
    }

    fn profile(email: &str, mobile: &str) -> UpdateUser {
        UpdateUser {
            first_name: "Asha".into(),
            middle_name: Some("K".into()),
            last_name: "Rao".into(),
            email: email.into(),
            mobile_number: mobile.into(),
        }
    }

    #[tokio::test]
    async fn test_create_with_addresses() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(new_user("asha@example.com", "9876543210"), vec![home()])
            .await
            .unwrap();

        assert_eq!(user.addresses.len(), 1);
        assert_eq!(user.addresses[0].user_id, user.id);
        assert_eq!(repo.find_by_email("asha@example.com").await.unwrap().unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_email_then_mobile() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("asha@example.com", "9876543210"), vec![]).await.unwrap();

        let err = repo
            .create(new_user("asha@example.com", "9000000000"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));

        let err = repo
            .create(new_user("ravi@example.com", "9876543210"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateMobile(_)));
    }

    #[tokio::test]
    async fn test_deleted_user_frees_email() {
        let repo = InMemoryUserRepository::new();
        let user = repo.create(new_user("asha@example.com", "9876543210"), vec![]).await.unwrap();

        assert!(repo.soft_delete(user.id).await.unwrap());
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(!repo.soft_delete(user.id).await.unwrap());

        assert!(repo.create(new_user("asha@example.com", "9876543210"), vec![]).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_keeps_own_email_but_not_anothers() {
        let repo = InMemoryUserRepository::new();
        let asha = repo.create(new_user("asha@example.com", "9876543210"), vec![home()]).await.unwrap();
        repo.create(new_user("ravi@example.com", "9123456789"), vec![]).await.unwrap();

        let updated = repo
            .update(asha.id, profile("asha@example.com", "9876543210"))
            .await
            .unwrap();
        assert_eq!(updated.middle_name.as_deref(), Some("K"));
        assert_eq!(updated.addresses.len(), 1);
        assert_eq!(updated.password_hash, asha.password_hash);

        let err = repo
            .update(asha.id, profile("asha@example.com", "9123456789"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateMobile(_)));
    }

    #[tokio::test]
    async fn test_delete_address_only_for_owner() {
        let repo = InMemoryUserRepository::new();
        let asha = repo.create(new_user("asha@example.com", "9876543210"), vec![]).await.unwrap();
        let ravi = repo.create(new_user("ravi@example.com", "9123456789"), vec![]).await.unwrap();
        let address = repo.add_address(asha.id, home()).await.unwrap();

        assert!(!repo.soft_delete_address(ravi.id, address.id).await.unwrap());
        assert!(repo.soft_delete_address(asha.id, address.id).await.unwrap());
        assert!(repo.find_address(address.id).await.unwrap().is_none());
        assert!(repo.find_addresses(asha.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_address_to_unknown_user() {
        let repo = InMemoryUserRepository::new();
        let result = repo.add_address(Uuid::now_v7(), home()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }
}
