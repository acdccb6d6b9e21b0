use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_uuid(Users::Id))
                    .col(string_len(Users::FirstName, 50))
                    .col(string_len_null(Users::MiddleName, 50))
                    .col(string_len(Users::LastName, 50))
                    .col(string_len(Users::Email, 255))
                    .col(string_len(Users::MobileNumber, 20))
                    .col(string(Users::PasswordHash))
                    .col(json(Users::Roles).default("[]"))
                    .col(boolean(Users::Deleted).default(false))
                    .col(timestamp_with_time_zone(Users::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Users::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        // Constraint names are matched by the users repository to tell
        // email clashes from mobile number clashes
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX uq_users_email ON users (email) WHERE deleted = false",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX uq_users_mobile_number ON users (mobile_number) WHERE deleted = false",
        )
        .await?;

        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_uuid(Addresses::Id))
                    .col(uuid(Addresses::UserId))
                    .col(string_len(Addresses::DoorNumber, 20))
                    .col(string_len(Addresses::Street, 100))
                    .col(string_len(Addresses::City, 50))
                    .col(string_len(Addresses::State, 50))
                    .col(string_len(Addresses::PinCode, 10))
                    .col(string_len(Addresses::AddressType, 20))
                    .col(string_len_null(Addresses::Landmark, 100))
                    .col(boolean(Addresses::Deleted).default(false))
                    .col(timestamp_with_time_zone(Addresses::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp_with_time_zone(Addresses::UpdatedAt).default(Expr::current_timestamp()))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_addresses_user_id")
                            .from(Addresses::Table, Addresses::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_addresses_user_id")
                    .table(Addresses::Table)
                    .col(Addresses::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    Table,
    Id,
    FirstName,
    MiddleName,
    LastName,
    Email,
    MobileNumber,
    PasswordHash,
    Roles,
    Deleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    UserId,
    DoorNumber,
    Street,
    City,
    State,
    PinCode,
    AddressType,
    Landmark,
    Deleted,
    CreatedAt,
    UpdatedAt,
}
