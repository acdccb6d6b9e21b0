use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::entity::{cart, cart_product, wishlist, wishlist_product};
use crate::error::{ShoppingError, ShoppingResult};
use crate::models::{Cart, CartItem, MAX_CART_QUANTITY, Wishlist};

/// Storage for wishlists and the products saved in them
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistRepository: Send + Sync {
    /// `Duplicate` if the user already owns a live wishlist
    async fn create(&self, user_id: Uuid, name: String) -> ShoppingResult<Wishlist>;

    async fn find_by_id(&self, id: Uuid) -> ShoppingResult<Option<Wishlist>>;

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Wishlist>>;

    /// Saving a product twice leaves a single entry
    async fn add_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<Wishlist>;

    /// `false` when the product was not saved
    async fn remove_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<bool>;
}

/// Storage for carts and their line items
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// `Duplicate` if the user already owns a live cart
    async fn create(&self, user_id: Uuid) -> ShoppingResult<Cart>;

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Cart>>;

    /// Adds `quantity` to the line for `product_id`, creating it if needed
    async fn add_product(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShoppingResult<Cart>;

    /// `false` when the product was not in the cart
    async fn remove_product(&self, cart_id: Uuid, product_id: Uuid) -> ShoppingResult<bool>;
}

#[derive(Debug, Default)]
struct WishlistTables {
    wishlists: HashMap<Uuid, wishlist::Model>,
    products: Vec<wishlist_product::Model>,
}

impl WishlistTables {
    fn assemble(&self, row: &wishlist::Model) -> Wishlist {
        let product_ids = self
            .products
            .iter()
            .filter(|p| p.wishlist_id == row.id)
            .map(|p| p.product_id)
            .collect();
        row.clone().into_wishlist(product_ids)
    }

    fn live(&self, id: Uuid) -> Option<&wishlist::Model> {
        self.wishlists.get(&id).filter(|w| !w.deleted)
    }
}

/// In-memory implementation of WishlistRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryWishlistRepository {
    tables: Arc<RwLock<WishlistTables>>,
}

impl InMemoryWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistRepository for InMemoryWishlistRepository {
    async fn create(&self, user_id: Uuid, name: String) -> ShoppingResult<Wishlist> {
        let mut tables = self.tables.write().await;

        if tables.wishlists.values().any(|w| !w.deleted && w.user_id == user_id) {
            return Err(ShoppingError::Duplicate(user_id, "wishlist"));
        }

        let row = wishlist::Model::new(user_id, name);
        tables.wishlists.insert(row.id, row.clone());

        tracing::info!(wishlist_id = %row.id, %user_id, "Created wishlist");
        Ok(row.into_wishlist(Vec::new()))
    }

    async fn find_by_id(&self, id: Uuid) -> ShoppingResult<Option<Wishlist>> {
        let tables = self.tables.read().await;
        Ok(tables.live(id).map(|row| tables.assemble(row)))
    }

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Wishlist>> {
        let tables = self.tables.read().await;
        Ok(tables
            .wishlists
            .values()
            .find(|w| !w.deleted && w.user_id == user_id)
            .map(|row| tables.assemble(row)))
    }

    async fn add_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<Wishlist> {
        let mut tables = self.tables.write().await;
        if tables.live(wishlist_id).is_none() {
            return Err(ShoppingError::WishlistNotFound(wishlist_id));
        }

        let saved = tables
            .products
            .iter()
            .any(|p| p.wishlist_id == wishlist_id && p.product_id == product_id);
        if !saved {
            tables.products.push(wishlist_product::Model {
                wishlist_id,
                product_id,
                created_at: chrono::Utc::now().into(),
            });
        }

        let row = tables.live(wishlist_id).cloned().ok_or(ShoppingError::WishlistNotFound(wishlist_id))?;
        Ok(tables.assemble(&row))
    }

    async fn remove_product(&self, wishlist_id: Uuid, product_id: Uuid) -> ShoppingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.products.len();
        tables
            .products
            .retain(|p| !(p.wishlist_id == wishlist_id && p.product_id == product_id));
        Ok(tables.products.len() < before)
    }
}

#[derive(Debug, Default)]
struct CartTables {
    carts: HashMap<Uuid, cart::Model>,
    items: Vec<cart_product::Model>,
}

impl CartTables {
    fn assemble(&self, row: &cart::Model) -> Cart {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|i| i.cart_id == row.id)
            .cloned()
            .map(Into::into)
            .collect();
        row.clone().into_cart(items)
    }
}

/// In-memory implementation of CartRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCartRepository {
    tables: Arc<RwLock<CartTables>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn create(&self, user_id: Uuid) -> ShoppingResult<Cart> {
        let mut tables = self.tables.write().await;

        if tables.carts.values().any(|c| !c.deleted && c.user_id == user_id) {
            return Err(ShoppingError::Duplicate(user_id, "cart"));
        }

        let row = cart::Model::new(user_id);
        tables.carts.insert(row.id, row.clone());

        tracing::info!(cart_id = %row.id, %user_id, "Created cart");
        Ok(row.into_cart(Vec::new()))
    }

    async fn find_by_user(&self, user_id: Uuid) -> ShoppingResult<Option<Cart>> {
        let tables = self.tables.read().await;
        Ok(tables
            .carts
            .values()
            .find(|c| !c.deleted && c.user_id == user_id)
            .map(|row| tables.assemble(row)))
    }

    async fn add_product(&self, cart_id: Uuid, product_id: Uuid, quantity: i32) -> ShoppingResult<Cart> {
        let mut tables = self.tables.write().await;
        let row = tables
            .carts
            .get(&cart_id)
            .filter(|c| !c.deleted)
            .cloned()
            .ok_or_else(|| ShoppingError::Internal(format!("cart {} vanished", cart_id)))?;

        let now = chrono::Utc::now().into();
        let existing = tables
            .items
            .iter()
            .position(|i| i.cart_id == cart_id && i.product_id == product_id);
        let held = existing.map_or(0, |idx| tables.items[idx].quantity);
        let total = held
            .checked_add(quantity)
            .filter(|total| (1..=MAX_CART_QUANTITY).contains(total))
            .ok_or_else(|| ShoppingError::quantity_limit(product_id))?;

        match existing {
            Some(idx) => {
                let item = &mut tables.items[idx];
                item.quantity = total;
                item.updated_at = now;
            }
            None => tables.items.push(cart_product::Model {
                cart_id,
                product_id,
                quantity: total,
                created_at: now,
                updated_at: now,
            }),
        }

        Ok(tables.assemble(&row))
    }

    async fn remove_product(&self, cart_id: Uuid, product_id: Uuid) -> ShoppingResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();
        tables
            .items
            .retain(|i| !(i.cart_id == cart_id && i.product_id == product_id));
        Ok(tables.items.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_one_wishlist_per_user() {
        let repo = InMemoryWishlistRepository::new();
        let user = Uuid::now_v7();

        repo.create(user, "AshaWishlist".into()).await.unwrap();
        let err = repo.create(user, "Another".into()).await.unwrap_err();
        assert!(matches!(err, ShoppingError::Duplicate(id, "wishlist") if id == user));
    }

    #[tokio::test]
    async fn test_wishlist_add_is_idempotent() {
        let repo = InMemoryWishlistRepository::new();
        let wishlist = repo.create(Uuid::now_v7(), "w".into()).await.unwrap();
        let product = Uuid::now_v7();

        repo.add_product(wishlist.id, product).await.unwrap();
        let again = repo.add_product(wishlist.id, product).await.unwrap();

        assert_eq!(again.product_ids, vec![product]);
    }

    #[tokio::test]
    async fn test_wishlist_keeps_insertion_order() {
        let repo = InMemoryWishlistRepository::new();
        let wishlist = repo.create(Uuid::now_v7(), "w".into()).await.unwrap();
        let (first, second) = (Uuid::now_v7(), Uuid::now_v7());

        repo.add_product(wishlist.id, second).await.unwrap();
        repo.add_product(wishlist.id, first).await.unwrap();

        let found = repo.find_by_id(wishlist.id).await.unwrap().unwrap();
        assert_eq!(found.product_ids, vec![second, first]);
    }

    #[tokio::test]
    async fn test_wishlist_remove_reports_absence() {
        let repo = InMemoryWishlistRepository::new();
        let wishlist = repo.create(Uuid::now_v7(), "w".into()).await.unwrap();
        let product = Uuid::now_v7();

        assert!(!repo.remove_product(wishlist.id, product).await.unwrap());
        repo.add_product(wishlist.id, product).await.unwrap();
        assert!(repo.remove_product(wishlist.id, product).await.unwrap());

        let found = repo.find_by_user(wishlist.user_id).await.unwrap().unwrap();
        assert!(found.product_ids.is_empty());
    }

    #[tokio::test]
    async fn test_add_to_unknown_wishlist() {
        let repo = InMemoryWishlistRepository::new();
        let result = repo.add_product(Uuid::now_v7(), Uuid::now_v7()).await;
        assert!(matches!(result, Err(ShoppingError::WishlistNotFound(_))));
    }

    #[tokio::test]
    async fn test_cart_quantities_accumulate() {
        let repo = InMemoryCartRepository::new();
        let cart = repo.create(Uuid::now_v7()).await.unwrap();
        let product = Uuid::now_v7();

        repo.add_product(cart.id, product, 2).await.unwrap();
        let cart = repo.add_product(cart.id, product, 3).await.unwrap();

        assert_eq!(cart.items, vec![CartItem { product_id: product, quantity: 5 }]);
    }

    #[tokio::test]
    async fn test_cart_quantity_stops_at_limit() {
        let repo = InMemoryCartRepository::new();
        let cart = repo.create(Uuid::now_v7()).await.unwrap();
        let product = Uuid::now_v7();

        repo.add_product(cart.id, product, MAX_CART_QUANTITY).await.unwrap();
        let over = repo.add_product(cart.id, product, 1).await;
        assert!(matches!(over, Err(ShoppingError::Validation(_))));
        let wrapped = repo.add_product(cart.id, product, i32::MAX).await;
        assert!(matches!(wrapped, Err(ShoppingError::Validation(_))));

        let found = repo.find_by_user(cart.user_id).await.unwrap().unwrap();
        assert_eq!(found.items, vec![CartItem { product_id: product, quantity: MAX_CART_QUANTITY }]);
    }

    #[tokio::test]
    async fn test_one_cart_per_user() {
        let repo = InMemoryCartRepository::new();
        let user = Uuid::now_v7();

        repo.create(user).await.unwrap();
        assert!(matches!(
            repo.create(user).await,
            Err(ShoppingError::Duplicate(_, "cart"))
        ));
    }

    #[tokio::test]
    async fn test_cart_remove() {
        let repo = InMemoryCartRepository::new();
        let cart = repo.create(Uuid::now_v7()).await.unwrap();
        let product = Uuid::now_v7();
        repo.add_product(cart.id, product, 1).await.unwrap();

        assert!(repo.remove_product(cart.id, product).await.unwrap());
        assert!(!repo.remove_product(cart.id, product).await.unwrap());
        assert!(repo.find_by_user(cart.user_id).await.unwrap().unwrap().items.is_empty());
    }
}
