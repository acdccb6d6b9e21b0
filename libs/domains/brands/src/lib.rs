//! Brands Domain
//!
//! Brands are referenced by every product. Names are unique among
//! brands that have not been deleted.
//!
//! ```rust,no_run
//! use domain_brands::{handlers, InMemoryBrandRepository, BrandService};
//!
//! let service = BrandService::new(InMemoryBrandRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{BrandError, BrandResult};
pub use handlers::ApiDoc;
pub use models::{Brand, CreateBrand, UpdateBrand};
pub use postgres::PgBrandRepository;
pub use repository::{BrandRepository, InMemoryBrandRepository};
pub use service::BrandService;
