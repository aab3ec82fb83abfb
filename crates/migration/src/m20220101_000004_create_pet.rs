//! Create `pet` table with FK to `user` (cascade).
//!
//! Type, size and age are stored as their integer codes.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(uuid(Pet::Id).primary_key())
                    .col(uuid(Pet::UserId))
                    .col(string_len(Pet::Name, 100))
                    .col(integer(Pet::PetType))
                    .col(integer(Pet::Size))
                    .col(integer(Pet::Age))
                    .col(boolean(Pet::GetAlongWithDogs).default(false))
                    .col(boolean(Pet::GetAlongWithCats).default(false))
                    .col(boolean(Pet::IsUnsureWithDogs).default(false))
                    .col(boolean(Pet::IsUnsureWithCats).default(false))
                    .col(string_len_null(Pet::SpecialInstructions, 1000))
                    .col(string_len_null(Pet::MedicalConditions, 500))
                    .col(timestamp_with_time_zone(Pet::CreatedAt))
                    .col(timestamp_with_time_zone(Pet::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_user")
                            .from(Pet::Table, Pet::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet {
    Table,
    Id,
    UserId,
    Name,
    PetType,
    Size,
    Age,
    GetAlongWithDogs,
    GetAlongWithCats,
    IsUnsureWithDogs,
    IsUnsureWithCats,
    SpecialInstructions,
    MedicalConditions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User { Table, Id }
