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
                    .table(Wishlists::Table)
                    .if_not_exists()
                    .col(pk_uuid(Wishlists::Id))
                    .col(string_len(Wishlists::Name, 120))
                    .col(uuid(Wishlists::UserId))
                    .col(boolean(Wishlists::Deleted).default(false))
                    .col(timestamp_with_time_zone(Wishlists::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Wishlists::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlists_user_id")
                            .from(Wishlists::Table, Wishlists::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_wishlists_user_id ON wishlists (user_id) WHERE deleted = false",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WishlistProducts::Table)
                    .if_not_exists()
                    .col(uuid(WishlistProducts::WishlistId))
                    .col(uuid(WishlistProducts::ProductId))
                    .col(timestamp_with_time_zone(WishlistProducts::CreatedAt).default(Expr::current_timestamp()))
                    .primary_key(
                        Index::create()
                            .col(WishlistProducts::WishlistId)
                            .col(WishlistProducts::ProductId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_products_wishlist_id")
                            .from(WishlistProducts::Table, WishlistProducts::WishlistId)
                            .to(Wishlists::Table, Wishlists::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wishlist_products_product_id")
                            .from(WishlistProducts::Table, WishlistProducts::ProductId)
                            .to(Products::Table, Products::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WishlistProducts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Wishlists::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Wishlists {
    Table,
    Id,
    Name,
    UserId,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WishlistProducts {
    Table,
    WishlistId,
    ProductId,
    CreatedAt,
}
