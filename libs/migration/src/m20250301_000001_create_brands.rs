use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brands::Table)
                    .if_not_exists()
                    .col(pk_uuid(Brands::Id))
                    .col(string_len(Brands::Name, 100))
                    .col(boolean(Brands::Deleted).default(false))
                    .col(timestamp_with_time_zone(Brands::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Brands::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Soft-deleted rows release their name
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_brands_name ON brands (name) WHERE deleted = false",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brands::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Brands {
    Table,
    Id,
    Name,
    Deleted,
    CreatedAt,
    UpdatedAt,
}
