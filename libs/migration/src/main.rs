//! `DATABASE_URL=postgres://... migration up|down|status|fresh`

use migration::Migrator;
use sea_orm_migration::cli;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
