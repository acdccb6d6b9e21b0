use axum_helpers::JwtAuth;
use domain_shopping::{CartRepository, WishlistRepository};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{
    Address, CreateAddress, CreateUser, LoginRequest, LoginResponse, NewUser, RoleType,
    UpdateUser, User,
};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;

/// Account, address and login operations.
///
/// Signing up a customer also opens their wishlist and cart, so the service
/// holds the shopping repositories alongside its own.
pub struct UserService<R, W, C>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    repository: Arc<R>,
    wishlists: Arc<W>,
    carts: Arc<C>,
    jwt: JwtAuth,
}

fn invalid(errors: validator::ValidationErrors) -> UserError {
    UserError::Validation(errors.to_string())
}

impl<R, W, C> UserService<R, W, C>
where
    R: UserRepository,
    W: WishlistRepository,
    C: CartRepository,
{
    pub fn new(repository: R, wishlists: W, carts: C, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            wishlists: Arc::new(wishlists),
            carts: Arc::new(carts),
            jwt,
        }
    }

    /// Sign up. Users without roles become customers.
    ///
    /// The wishlist and cart are created after the user row; if either
    /// fails the user remains and the error is returned.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        input.validate().map_err(invalid)?;

        let mut roles: Vec<RoleType> = Vec::with_capacity(input.roles.len());
        for role in input.roles {
            if !roles.contains(&role) {
                roles.push(role);
            }
        }
        if roles.is_empty() {
            roles.push(RoleType::Customer);
        }

        let new_user = NewUser {
            first_name: input.first_name,
            middle_name: input.middle_name,
            last_name: input.last_name,
            email: input.email,
            mobile_number: input.mobile_number,
            password_hash: hash_password(&input.password)?,
            roles,
        };

        let user = self.repository.create(new_user, input.addresses).await?;

        if user.has_role(RoleType::Customer) {
            self.wishlists
                .create(user.id, format!("{}Wishlist", user.first_name))
                .await?;
            self.carts.create(user.id).await?;
            tracing::info!(user_id = %user.id, "Opened wishlist and cart for customer");
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_all().await
    }

    /// Replace the caller's own profile
    #[instrument(skip(self, input))]
    pub async fn update_user(&self, current_user_id: Uuid, input: UpdateUser) -> UserResult<User> {
        input.validate().map_err(invalid)?;
        self.repository.update(current_user_id, input).await
    }

    /// Users may only delete themselves; any other id reads as not found
    #[instrument(skip(self))]
    pub async fn delete_user(&self, current_user_id: Uuid, id: Uuid) -> UserResult<String> {
        if current_user_id != id {
            return Err(UserError::NotFound(id));
        }

        let user = self.get_user(id).await?;
        if !self.repository.soft_delete(id).await? {
            return Err(UserError::NotFound(id));
        }

        Ok(format!("{} deleted successfully", user.first_name))
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<(User, LoginResponse)> {
        input.validate().map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            return Err(UserError::InvalidCredentials);
        }

        let roles: Vec<String> = user.roles.iter().map(ToString::to_string).collect();
        let access_token = self
            .jwt
            .create_access_token(user.id, &user.email, &user.full_name(), &roles)
            .map_err(|e| UserError::Token(e.to_string()))?;

        let response = LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.ttl_secs(),
        };
        Ok((user, response))
    }

    #[instrument(skip(self, input))]
    pub async fn add_address(&self, user_id: Uuid, input: CreateAddress) -> UserResult<String> {
        input.validate().map_err(invalid)?;

        let user = self.get_user(user_id).await?;
        self.repository.add_address(user_id, input).await?;

        Ok(format!("{} address added successfully", user.first_name))
    }

    #[instrument(skip(self))]
    pub async fn get_address(&self, id: Uuid) -> UserResult<Address> {
        self.repository
            .find_address(id)
            .await?
            .ok_or(UserError::AddressNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_my_addresses(&self, user_id: Uuid) -> UserResult<Vec<Address>> {
        self.repository.find_addresses(user_id).await
    }

    /// Only the caller's own live addresses can be deleted
    #[instrument(skip(self))]
    pub async fn delete_address(&self, user_id: Uuid, id: Uuid) -> UserResult<String> {
        let user = self.get_user(user_id).await?;

        if !self.repository.soft_delete_address(user_id, id).await? {
            return Err(UserError::AddressNotFound(id));
        }

        tracing::info!(address_id = %id, %user_id, "Deleted address");
        Ok(format!("{} address deleted successfully", user.first_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::JwtConfig;
    use domain_shopping::{InMemoryCartRepository, InMemoryWishlistRepository};
    use mockall::predicate::*;
    use serde_json::json;

    type Service<R> = UserService<R, InMemoryWishlistRepository, InMemoryCartRepository>;

    fn jwt() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("users-service-test-secret-32-chars-long"))
    }

    fn service<R: UserRepository>(repository: R) -> (Service<R>, InMemoryWishlistRepository, InMemoryCartRepository) {
        let wishlists = InMemoryWishlistRepository::new();
        let carts = InMemoryCartRepository::new();
        let service = UserService::new(repository, wishlists.clone(), carts.clone(), jwt());
        (service, wishlists, carts)
    }

    fn signup(email: &str, mobile: &str, roles: serde_json::Value) -> CreateUser {
        serde_json::from_value(json!({
            "first_name": "Asha",
            "last_name": "Rao",
            "email": email,
            "mobile_number": mobile,
            "password": "Str0ng!pass",
            "roles": roles,
            "addresses": [{
                "door_number": "12B",
                "street": "MG Road",
                "city": "Chennai",
                "state": "Tamil Nadu",
                "pin_code": "600001",
                "address_type": "HOME"
            }]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_customer_signup_opens_wishlist_and_cart() {
        let (service, wishlists, carts) = service(InMemoryUserRepository::new());

        let user = service
            .create_user(signup("asha@example.com", "9876543210", json!([])))
            .await
            .unwrap();

        assert_eq!(user.roles, vec![RoleType::Customer]);
        assert_ne!(user.password_hash, "Str0ng!pass");
        assert_eq!(user.addresses.len(), 1);

        let wishlist = wishlists.find_by_user(user.id).await.unwrap().unwrap();
        assert_eq!(wishlist.name, "AshaWishlist");
        assert!(carts.find_by_user(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seller_signup_has_no_wishlist() {
        let (service, wishlists, carts) = service(InMemoryUserRepository::new());

        let user = service
            .create_user(signup("sam@example.com", "9876543210", json!(["seller"])))
            .await
            .unwrap();

        assert_eq!(user.roles, vec![RoleType::Seller]);
        assert!(wishlists.find_by_user(user.id).await.unwrap().is_none());
        assert!(carts.find_by_user(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_signup_never_reaches_repository() {
        let mut mock = MockUserRepository::new();
        mock.expect_create().never();
        let (service, _, _) = service(mock);

        let result = service
            .create_user(signup("not-an-email", "9876543210", json!([])))
            .await;
        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_duplicate_signup_creates_no_second_wishlist() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        service
            .create_user(signup("asha@example.com", "9876543210", json!([])))
            .await
            .unwrap();

        let err = service
            .create_user(signup("asha@example.com", "9000000001", json!([])))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::DuplicateEmail(_)));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut mock = MockUserRepository::new();
        let id = Uuid::now_v7();
        mock.expect_find_by_id()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(None));
        let (service, _, _) = service(mock);

        assert!(matches!(service.get_user(id).await, Err(UserError::NotFound(found)) if found == id));
    }

    #[tokio::test]
    async fn test_delete_someone_else_is_not_found() {
        let mut mock = MockUserRepository::new();
        mock.expect_soft_delete().never();
        let (service, _, _) = service(mock);

        let result = service.delete_user(Uuid::now_v7(), Uuid::now_v7()).await;
        assert!(matches!(result, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_self() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        let user = service
            .create_user(signup("asha@example.com", "9876543210", json!([])))
            .await
            .unwrap();

        let message = service.delete_user(user.id, user.id).await.unwrap();
        assert_eq!(message, "Asha deleted successfully");
        assert!(matches!(service.get_user(user.id).await, Err(UserError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        let user = service
            .create_user(signup("asha@example.com", "9876543210", json!(["CUSTOMER", "ADMIN"])))
            .await
            .unwrap();

        let (_, response) = service
            .login(LoginRequest {
                email: "asha@example.com".into(),
                password: "Str0ng!pass".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 900);

        let claims = jwt().verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "Asha Rao");
        assert!(claims.has_role("ADMIN"));
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_email() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        service
            .create_user(signup("asha@example.com", "9876543210", json!([])))
            .await
            .unwrap();

        for (email, password) in [("asha@example.com", "Wr0ng!pass"), ("ravi@example.com", "Str0ng!pass")] {
            let result = service
                .login(LoginRequest { email: email.into(), password: password.into() })
                .await;
            assert!(matches!(result, Err(UserError::InvalidCredentials)));
        }
    }

    #[tokio::test]
    async fn test_update_keeps_roles_and_password() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        let user = service
            .create_user(signup("asha@example.com", "9876543210", json!(["SELLER"])))
            .await
            .unwrap();

        let updated = service
            .update_user(
                user.id,
                UpdateUser {
                    first_name: "Asha".into(),
                    middle_name: None,
                    last_name: "Iyer".into(),
                    email: "asha.iyer@example.com".into(),
                    mobile_number: "9876543210".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.last_name, "Iyer");
        assert_eq!(updated.roles, vec![RoleType::Seller]);
        assert_eq!(updated.password_hash, user.password_hash);
        assert_eq!(updated.addresses, user.addresses);
    }

    #[tokio::test]
    async fn test_addresses() {
        let (service, _, _) = service(InMemoryUserRepository::new());
        let asha = service
            .create_user(signup("asha@example.com", "9876543210", json!([])))
            .await
            .unwrap();
        let ravi = service
            .create_user(signup("ravi@example.com", "9123456789", json!([])))
            .await
            .unwrap();

        let office: CreateAddress = serde_json::from_value(json!({
            "door_number": "4",
            "street": "Anna Salai",
            "city": "Chennai",
            "state": "Tamil Nadu",
            "pin_code": "600002",
            "address_type": "WORK",
            "landmark": "Near the bus stand"
        }))
        .unwrap();

        let message = service.add_address(asha.id, office).await.unwrap();
        assert_eq!(message, "Asha address added successfully");

        let mine = service.get_my_addresses(asha.id).await.unwrap();
        assert_eq!(mine.len(), 2);
        let work = mine.iter().find(|a| a.address_type == "WORK").unwrap();
        assert_eq!(service.get_address(work.id).await.unwrap().street, "Anna Salai");

        let result = service.delete_address(ravi.id, work.id).await;
        assert!(matches!(result, Err(UserError::AddressNotFound(_))));

        service.delete_address(asha.id, work.id).await.unwrap();
        assert!(matches!(service.get_address(work.id).await, Err(UserError::AddressNotFound(_))));
    }
}
