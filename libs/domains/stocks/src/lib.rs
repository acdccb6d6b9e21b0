//! Stocks Domain
//!
//! A stock row records how many units of a product a seller holds. Rows are
//! created by the products domain when a product is listed; this crate
//! serves the seller-facing reads and adjustments.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{StockError, StockResult};
pub use handlers::ApiDoc;
pub use models::{NewStock, Stock, UpdateStock};
pub use postgres::PgStockRepository;
pub use repository::{InMemoryStockRepository, StockRepository};
pub use service::StockService;
