//! PostgreSQL connection pool, migrations and error helpers

mod config;
mod connector;
mod errors;
mod health;

pub use config::PostgresConfig;
pub use connector::{
    connect_from_config, connect_from_config_with_retry, connect_with_options, run_migrations,
};
pub use errors::{is_unique_violation, unique_violation, violates_constraint};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
