//! Tables owned by the shopping domain.
//!
//! `wishlist_products` and `cart_products` are join tables keyed by
//! (owner, product); a product appears at most once per wishlist or cart.

pub mod cart;
pub mod cart_product;
pub mod wishlist;
pub mod wishlist_product;
