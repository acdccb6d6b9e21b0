use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000003_create_users::Users;
use crate::m20250301_000004_create_products::Products;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stocks::Table)
                    .if_not_exists()
                    .col(pk_uuid(Stocks::Id))
                    .col(integer(Stocks::Quantity))
                    .col(uuid(Stocks::SellerId))
                    .col(uuid(Stocks::ProductId))
                    .col(boolean(Stocks::Deleted).default(false))
                    .col(timestamp_with_time_zone(Stocks::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Stocks::UpdatedAt).default(Expr::current_timestamp()))
                    .check(Expr::col(Stocks::Quantity).gte(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stocks_seller_id")
                            .from(Stocks::Table, Stocks::SellerId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stocks_product_id")
                            .from(Stocks::Table, Stocks::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stocks_seller_id")
                    .table(Stocks::Table)
                    .col(Stocks::SellerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stocks_product_id")
                    .table(Stocks::Table)
                    .col(Stocks::ProductId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stocks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Stocks {
    Table,
    Id,
    Quantity,
    SellerId,
    ProductId,
    Deleted,
    CreatedAt,
    UpdatedAt,
}
