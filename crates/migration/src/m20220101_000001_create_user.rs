//! Create `user` table.
//!
//! Email is unique across the whole marketplace; it is the login identifier.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(uuid(User::Id).primary_key())
                    .col(string_len(User::Email, 255).unique_key())
                    .col(string_len(User::FirstName, 50))
                    .col(string_len(User::LastName, 50))
                    .col(string_len_null(User::ZipCode, 10))
                    .col(string_len_null(User::HowDidYouHear, 500))
                    .col(timestamp_with_time_zone(User::CreatedAt))
                    .col(timestamp_with_time_zone(User::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(User::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum User { Table, Id, Email, FirstName, LastName, ZipCode, HowDidYouHear, CreatedAt, UpdatedAt }
