//! Products Domain
//!
//! Listing a product ties it to a brand, a category and one of that
//! category's sub-categories, and records the seller's stock for it.
//!
//! ```text
//! add_product
//!   ├─ manufacture date < expiry date
//!   ├─ brand / category / sub-category exist
//!   ├─ reuse a live product with the same name and description, or insert
//!   └─ add stock for the caller
//! ```
//!
//! The brands, categories and stocks services are injected so each keeps
//! its own repository.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{CreateProduct, NewProduct, Product, UpdateProduct};
pub use postgres::PgProductRepository;
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
