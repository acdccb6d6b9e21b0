//! Shopping Domain: wishlists and carts
//!
//! Every customer owns exactly one wishlist and one cart, both created at
//! signup. All operations act on the caller's own wishlist or cart.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ShoppingError, ShoppingResult};
pub use handlers::{CartApiDoc, WishlistApiDoc, cart_router, wishlist_router};
pub use models::{AddToCart, Cart, CartItem, MAX_CART_QUANTITY, Wishlist};
pub use postgres::{PgCartRepository, PgWishlistRepository};
pub use repository::{
    CartRepository, InMemoryCartRepository, InMemoryWishlistRepository, WishlistRepository,
};
pub use service::{CartService, WishlistService};
