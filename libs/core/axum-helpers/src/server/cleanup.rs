use tracing::{error, info};

/// Close the SeaORM pool during shutdown
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(pool = name, "PostgreSQL pool closed"),
        Err(e) => error!(pool = name, "Error closing PostgreSQL pool: {}", e),
    }
}
