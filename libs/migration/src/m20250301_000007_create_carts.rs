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
                    .table(Carts::Table)
                    .if_not_exists()
                    .col(pk_uuid(Carts::Id))
                    .col(uuid(Carts::UserId))
                    .col(boolean(Carts::Deleted).default(false))
                    .col(timestamp_with_time_zone(Carts::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Carts::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_carts_user_id")
                            .from(Carts::Table, Carts::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_carts_user_id ON carts (user_id) WHERE deleted = false",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CartProducts::Table)
                    .if_not_exists()
                    .col(uuid(CartProducts::CartId))
                    .col(uuid(CartProducts::ProductId))
                    .col(integer(CartProducts::Quantity))
                    .col(timestamp_with_time_zone(CartProducts::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(CartProducts::UpdatedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(CartProducts::CartId)
                            .col(CartProducts::ProductId),
                    )
                    .check(Expr::col(CartProducts::Quantity).gt(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_products_cart_id")
                            .from(CartProducts::Table, CartProducts::CartId)
                            .to(Carts::Table, Carts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_products_product_id")
                            .from(CartProducts::Table, CartProducts::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CartProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Carts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Carts {
    Table,
    Id,
    UserId,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CartProducts {
    Table,
    CartId,
    ProductId,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
