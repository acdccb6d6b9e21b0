//! PostgreSQL connectivity for the store services.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connector, migrations runner, health checks,
//!   constraint-violation helpers
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`] and
//!   [`common::RetryConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "store_api").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
