use domain_products::{Product, ProductError, ProductRepository};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ShoppingError, ShoppingResult};
use crate::models::{AddToCart, Cart, Wishlist};
use crate::repository::{CartRepository, WishlistRepository};

async fn require_product<P: ProductRepository>(products: &P, id: Uuid) -> ShoppingResult<Product> {
    products
        .find_by_id(id)
        .await?
        .ok_or_else(|| ProductError::NotFound(id).into())
}

/// Wishlist operations, always on behalf of the wishlist's owner
pub struct WishlistService<W: WishlistRepository, P: ProductRepository> {
    wishlists: Arc<W>,
    products: Arc<P>,
}

impl<W: WishlistRepository, P: ProductRepository> Clone for WishlistService<W, P> {
    fn clone(&self) -> Self {
        Self {
            wishlists: Arc::clone(&self.wishlists),
            products: Arc::clone(&self.products),
        }
    }
}

impl<W: WishlistRepository, P: ProductRepository> WishlistService<W, P> {
    pub fn new(wishlists: W, products: P) -> Self {
        Self {
            wishlists: Arc::new(wishlists),
            products: Arc::new(products),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_wishlist(&self, user_id: Uuid, name: String) -> ShoppingResult<Wishlist> {
        self.wishlists.create(user_id, name).await
    }

    /// Another user's wishlist reads as not found
    #[instrument(skip(self))]
    pub async fn get_wishlist(&self, id: Uuid, user_id: Uuid) -> ShoppingResult<Wishlist> {
        self.wishlists
            .find_by_id(id)
            .await?
            .filter(|w| w.user_id == user_id)
            .ok_or(ShoppingError::WishlistNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn get_my_wishlist(&self, user_id: Uuid) -> ShoppingResult<Wishlist> {
        self.wishlists
            .find_by_user(user_id)
            .await?
            .ok_or(ShoppingError::NoWishlist(user_id))
    }

    #[instrument(skip(self))]
    pub async fn add_product_to_wishlist(&self, user_id: Uuid, product_id: Uuid) -> ShoppingResult<Wishlist> {
        let wishlist = self.get_my_wishlist(user_id).await?;
        require_product(self.products.as_ref(), product_id).await?;

        self.wishlists.add_product(wishlist.id, product_id).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product_from_wishlist(&self, user_id: Uuid, product_id: Uuid) -> ShoppingResult<()> {
        let wishlist = self.get_my_wishlist(user_id).await?;

        if !self.wishlists.remove_product(wishlist.id, product_id).await? {
            return Err(ShoppingError::NotInWishlist(product_id));
        }

        tracing::info!(wishlist_id = %wishlist.id, %product_id, "Removed product from wishlist");
        Ok(())
    }

    /// Saved products that are still listed, in the order they were saved
    #[instrument(skip(self))]
    pub async fn get_wishlist_products(&self, user_id: Uuid) -> ShoppingResult<Vec<Product>> {
        let wishlist = self.get_my_wishlist(user_id).await?;
        if wishlist.product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut live: HashMap<Uuid, Product> = self
            .products
            .find_by_ids(wishlist.product_ids.clone())
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(wishlist
            .product_ids
            .iter()
            .filter_map(|id| live.remove(id))
            .collect())
    }
}

/// Cart operations, always on behalf of the cart's owner
pub struct CartService<C: CartRepository, P: ProductRepository> {
    carts: Arc<C>,
    products: Arc<P>,
}

impl<C: CartRepository, P: ProductRepository> Clone for CartService<C, P> {
    fn clone(&self) -> Self {
        Self {
            carts: Arc::clone(&self.carts),
            products: Arc::clone(&self.products),
        }
    }
}

impl<C: CartRepository, P: ProductRepository> CartService<C, P> {
    pub fn new(carts: C, products: P) -> Self {
        Self {
            carts: Arc::new(carts),
            products: Arc::new(products),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_cart(&self, user_id: Uuid) -> ShoppingResult<Cart> {
        self.carts.create(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn get_my_cart(&self, user_id: Uuid) -> ShoppingResult<Cart> {
        self.carts
            .find_by_user(user_id)
            .await?
            .ok_or(ShoppingError::NoCart(user_id))
    }

    #[instrument(skip(self))]
    pub async fn add_product_to_cart(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        input: AddToCart,
    ) -> ShoppingResult<Cart> {
        input
            .validate()
            .map_err(|e| ShoppingError::Validation(e.to_string()))?;

        let cart = self.get_my_cart(user_id).await?;
        require_product(self.products.as_ref(), product_id).await?;

        self.carts.add_product(cart.id, product_id, input.quantity).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product_from_cart(&self, user_id: Uuid, product_id: Uuid) -> ShoppingResult<()> {
        let cart = self.get_my_cart(user_id).await?;

        if !self.carts.remove_product(cart.id, product_id).await? {
            return Err(ShoppingError::NotInCart(product_id));
        }

        tracing::info!(cart_id = %cart.id, %product_id, "Removed product from cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MAX_CART_QUANTITY;
    use crate::repository::{
        InMemoryCartRepository, InMemoryWishlistRepository, MockCartRepository,
        MockWishlistRepository,
    };
    use domain_products::{InMemoryProductRepository, NewProduct};
    use mockall::predicate::*;

    async fn listed(products: &InMemoryProductRepository, name: &str) -> Product {
        products
            .create(NewProduct {
                name: name.to_string(),
                description: format!("{} description", name),
                price: 10.0,
                brand_id: Uuid::now_v7(),
                category_id: Uuid::now_v7(),
                sub_category_id: Uuid::now_v7(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_my_wishlist_missing() {
        let mut mock = MockWishlistRepository::new();
        let user = Uuid::now_v7();
        mock.expect_find_by_user()
            .with(eq(user))
            .times(1)
            .returning(|_| Ok(None));

        let service = WishlistService::new(mock, InMemoryProductRepository::new());
        let err = service.get_my_wishlist(user).await.unwrap_err();
        assert!(matches!(err, ShoppingError::NoWishlist(id) if id == user));
    }

    #[tokio::test]
    async fn test_add_unknown_product_never_touches_wishlist() {
        let user = Uuid::now_v7();
        let wishlists = InMemoryWishlistRepository::new();
        let wishlist = wishlists.create(user, "AshaWishlist".into()).await.unwrap();

        let service = WishlistService::new(wishlists.clone(), InMemoryProductRepository::new());
        let missing = Uuid::now_v7();
        let err = service.add_product_to_wishlist(user, missing).await.unwrap_err();

        assert!(matches!(err, ShoppingError::Product(ProductError::NotFound(id)) if id == missing));
        let stored = wishlists.find_by_id(wishlist.id).await.unwrap().unwrap();
        assert!(stored.product_ids.is_empty());
    }

    #[tokio::test]
    async fn test_get_wishlist_of_another_user() {
        let wishlists = InMemoryWishlistRepository::new();
        let wishlist = wishlists.create(Uuid::now_v7(), "w".into()).await.unwrap();
        let service = WishlistService::new(wishlists, InMemoryProductRepository::new());

        let result = service.get_wishlist(wishlist.id, Uuid::now_v7()).await;
        assert!(matches!(result, Err(ShoppingError::WishlistNotFound(_))));
        assert!(service.get_wishlist(wishlist.id, wishlist.user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_wishlist_products_skip_deleted_and_keep_order() {
        let user = Uuid::now_v7();
        let products = InMemoryProductRepository::new();
        let tea = listed(&products, "Tea").await;
        let coffee = listed(&products, "Coffee").await;
        let cocoa = listed(&products, "Cocoa").await;

        let service = WishlistService::new(InMemoryWishlistRepository::new(), products.clone());
        service.create_wishlist(user, "w".into()).await.unwrap();
        for id in [cocoa.id, tea.id, coffee.id] {
            service.add_product_to_wishlist(user, id).await.unwrap();
        }
        products.soft_delete(tea.id).await.unwrap();

        let names: Vec<String> = service
            .get_wishlist_products(user)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Cocoa", "Coffee"]);
    }

    #[tokio::test]
    async fn test_remove_product_not_in_wishlist() {
        let user = Uuid::now_v7();
        let service = WishlistService::new(InMemoryWishlistRepository::new(), InMemoryProductRepository::new());
        service.create_wishlist(user, "w".into()).await.unwrap();

        let product = Uuid::now_v7();
        let err = service.remove_product_from_wishlist(user, product).await.unwrap_err();
        assert!(matches!(err, ShoppingError::NotInWishlist(id) if id == product));
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_zero_quantity() {
        let mut mock = MockCartRepository::new();
        mock.expect_find_by_user().never();
        mock.expect_add_product().never();

        let service = CartService::new(mock, InMemoryProductRepository::new());
        let result = service
            .add_product_to_cart(Uuid::now_v7(), Uuid::now_v7(), AddToCart { quantity: 0 })
            .await;
        assert!(matches!(result, Err(ShoppingError::Validation(_))));
    }

    #[tokio::test]
    async fn test_add_to_cart_accumulates() {
        let user = Uuid::now_v7();
        let products = InMemoryProductRepository::new();
        let tea = listed(&products, "Tea").await;

        let service = CartService::new(InMemoryCartRepository::new(), products);
        service.create_cart(user).await.unwrap();
        service
            .add_product_to_cart(user, tea.id, AddToCart { quantity: 2 })
            .await
            .unwrap();
        let cart = service
            .add_product_to_cart(user, tea.id, AddToCart { quantity: 1 })
            .await
            .unwrap();

        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_add_to_cart_rejects_quantity_past_limit() {
        let user = Uuid::now_v7();
        let products = InMemoryProductRepository::new();
        let tea = listed(&products, "Tea").await;

        let service = CartService::new(InMemoryCartRepository::new(), products);
        service.create_cart(user).await.unwrap();

        let huge = service
            .add_product_to_cart(user, tea.id, AddToCart { quantity: i32::MAX })
            .await;
        assert!(matches!(huge, Err(ShoppingError::Validation(_))));

        service
            .add_product_to_cart(user, tea.id, AddToCart { quantity: MAX_CART_QUANTITY - 1 })
            .await
            .unwrap();
        let over = service
            .add_product_to_cart(user, tea.id, AddToCart { quantity: 2 })
            .await;
        assert!(matches!(over, Err(ShoppingError::Validation(_))));

        let cart = service.get_my_cart(user).await.unwrap();
        assert_eq!(cart.items[0].quantity, MAX_CART_QUANTITY - 1);
    }

    #[tokio::test]
    async fn test_cart_missing_for_user() {
        let service = CartService::new(InMemoryCartRepository::new(), InMemoryProductRepository::new());
        let result = service.get_my_cart(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ShoppingError::NoCart(_))));
    }

    #[tokio::test]
    async fn test_remove_product_not_in_cart() {
        let user = Uuid::now_v7();
        let service = CartService::new(InMemoryCartRepository::new(), InMemoryProductRepository::new());
        service.create_cart(user).await.unwrap();

        let result = service.remove_product_from_cart(user, Uuid::now_v7()).await;
        assert!(matches!(result, Err(ShoppingError::NotInCart(_))));
    }
}
